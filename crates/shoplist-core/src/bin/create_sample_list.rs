use anyhow::Context;
use shoplist_core::{Category, Command, FileStorage, ListStore, Session};
use std::path::PathBuf;
use url::Url;

fn main() -> anyhow::Result<()> {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample-data"));

    let mut session = Session::open(ListStore::new(FileStorage::new(&dir)));
    session.dispatch(Command::ClearAll);

    for (name, quantity, category) in [
        ("Bananas", 6, Category::Produce),
        ("Spinach", 1, Category::Produce),
        ("Milk", 2, Category::Dairy),
        ("Chicken thighs", 1, Category::Meat),
        ("Sourdough", 1, Category::Bakery),
        ("Rice", 1, Category::Pantry),
        ("Peas", 2, Category::Frozen),
        ("Dish soap", 1, Category::Household),
        ("Toothpaste", 1, Category::Personal),
        ("Birthday card", 1, Category::Other),
    ] {
        session.dispatch(Command::Add {
            name: name.to_string(),
            quantity,
            category,
        });
    }

    // Mark one item as bought so every view has something in it.
    if let Some(id) = session.items().get(2).map(|item| item.id) {
        session.dispatch(Command::TogglePurchased(id));
    }

    let base = Url::parse("https://shoplist.local/").context("Invalid base URL")?;
    println!(
        "Created {} with {} items",
        session.store().storage().path_for(session.store().key()).display(),
        session.items().len()
    );
    println!("Share URL: {}", session.share_url(&base));
    Ok(())
}
