//! Pure list transitions and derived views.
//!
//! Every transition takes the current collection by reference and returns a
//! new one; the input is never mutated.

use crate::models::{Category, Filter, Item, ItemCounts};
use chrono::{DateTime, SecondsFormat, Utc};

/// Pick an id for an item created at `now`.
///
/// Ids are millisecond timestamps, bumped past the largest id already in the
/// collection so two items created within one millisecond never collide.
pub fn next_id(items: &[Item], now: DateTime<Utc>) -> i64 {
    let stamp = now.timestamp_millis();
    match items.iter().map(|item| item.id).max() {
        Some(max) if max >= stamp => max.saturating_add(1),
        _ => stamp,
    }
}

/// Format a creation time the way stored lists carry it.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Append a new pending item. A blank name leaves the list unchanged.
pub fn add_item(
    items: &[Item],
    name: &str,
    quantity: i64,
    category: Category,
    now: DateTime<Utc>,
) -> Vec<Item> {
    let name = name.trim();
    if name.is_empty() {
        tracing::debug!("Ignoring item with blank name");
        return items.to_vec();
    }

    let item = Item {
        id: next_id(items, now),
        name: name.to_string(),
        quantity,
        category,
        purchased: false,
        created_at: timestamp(now),
    };
    tracing::debug!("Adding item {} ({})", item.id, item.name);

    let mut next = Vec::with_capacity(items.len() + 1);
    next.extend_from_slice(items);
    next.push(item);
    next
}

/// Flip the purchased flag of the item with `id`.
pub fn toggle_purchased(items: &[Item], id: i64) -> Vec<Item> {
    items
        .iter()
        .map(|item| {
            if item.id == id {
                Item {
                    purchased: !item.purchased,
                    ..item.clone()
                }
            } else {
                item.clone()
            }
        })
        .collect()
}

pub fn delete_item(items: &[Item], id: i64) -> Vec<Item> {
    items.iter().filter(|item| item.id != id).cloned().collect()
}

/// Drop every purchased item.
pub fn clear_purchased(items: &[Item]) -> Vec<Item> {
    items.iter().filter(|item| !item.purchased).cloned().collect()
}

pub fn clear_all(_items: &[Item]) -> Vec<Item> {
    Vec::new()
}

/// Items visible under `mode`, in list order.
pub fn filter(items: &[Item], mode: Filter) -> Vec<&Item> {
    items.iter().filter(|item| mode.matches(item)).collect()
}

/// Bucket items by category.
///
/// Buckets follow taxonomy order, items keep their relative order, and
/// categories without items are left out.
pub fn group_by_category<'a, I>(items: I) -> Vec<(Category, Vec<&'a Item>)>
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut buckets: Vec<Vec<&Item>> = vec![Vec::new(); Category::ALL.len()];
    for item in items {
        buckets[item.category.index()].push(item);
    }

    Category::ALL
        .into_iter()
        .zip(buckets)
        .filter(|(_, bucket)| !bucket.is_empty())
        .collect()
}

pub fn counts(items: &[Item]) -> ItemCounts {
    let purchased = items.iter().filter(|item| item.purchased).count();
    ItemCounts {
        total: items.len(),
        pending: items.len() - purchased,
        purchased,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    fn sample() -> Vec<Item> {
        let mut items: Vec<Item> = Vec::new();
        items = add_item(&items, "Apples", 6, Category::Produce, at(1_000));
        items = add_item(&items, "Milk", 2, Category::Dairy, at(2_000));
        items = add_item(&items, "Bananas", 1, Category::Produce, at(3_000));
        items = add_item(&items, "Soap", 1, Category::Household, at(4_000));
        items = add_item(&items, "Cheese", 1, Category::Dairy, at(5_000));
        items
    }

    #[test]
    fn add_appends_pending_item() {
        let items = sample();
        let next = add_item(&items, "  Eggs ", 12, Category::Dairy, at(9_000));

        assert_eq!(next.len(), items.len() + 1);
        let added = next.last().unwrap();
        assert_eq!(added.name, "Eggs");
        assert_eq!(added.quantity, 12);
        assert_eq!(added.category, Category::Dairy);
        assert!(!added.purchased);
        assert_eq!(added.id, 9_000);
        assert_eq!(added.created_at, "1970-01-01T00:00:09.000Z");
        assert_eq!(&next[..items.len()], &items[..]);
    }

    #[test]
    fn add_with_blank_name_is_noop() {
        let items = sample();
        assert_eq!(add_item(&items, "", 1, Category::Other, at(9_000)), items);
        assert_eq!(add_item(&items, " \t\n", 1, Category::Other, at(9_000)), items);
    }

    #[test]
    fn ids_stay_unique_within_one_millisecond() {
        let mut items: Vec<Item> = Vec::new();
        for name in ["a", "b", "c"] {
            items = add_item(&items, name, 1, Category::Other, at(42));
        }
        let ids: Vec<i64> = items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![42, 43, 44]);
    }

    #[test]
    fn next_id_never_goes_backwards() {
        let items = add_item(&[], "Future", 1, Category::Other, at(10_000));
        assert_eq!(next_id(&items, at(5_000)), 10_001);
        assert_eq!(next_id(&items, at(20_000)), 20_000);
        assert_eq!(next_id(&[], at(7)), 7);
    }

    #[test]
    fn toggle_twice_restores_state() {
        let items = sample();
        let id = items[1].id;

        let once = toggle_purchased(&items, id);
        assert!(once[1].purchased);
        assert_eq!(once.iter().filter(|item| item.purchased).count(), 1);

        let twice = toggle_purchased(&once, id);
        assert_eq!(twice, items);
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let items = sample();
        assert_eq!(toggle_purchased(&items, -1), items);
    }

    #[test]
    fn delete_removes_only_matching_item() {
        let items = sample();
        let id = items[2].id;
        let next = delete_item(&items, id);
        assert_eq!(next.len(), items.len() - 1);
        assert!(next.iter().all(|item| item.id != id));
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let items = sample();
        assert_eq!(delete_item(&items, 123_456), items);
    }

    #[test]
    fn clear_purchased_keeps_pending() {
        let items = sample();
        let items = toggle_purchased(&items, items[0].id);
        let items = toggle_purchased(&items, items[3].id);

        let next = clear_purchased(&items);
        let names: Vec<&str> = next.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Milk", "Bananas", "Cheese"]);
    }

    #[test]
    fn clear_all_empties() {
        assert!(clear_all(&sample()).is_empty());
        assert!(clear_all(&[]).is_empty());
    }

    #[test]
    fn filter_partitions_collection() {
        let items = sample();
        let items = toggle_purchased(&items, items[1].id);
        let items = toggle_purchased(&items, items[4].id);

        let all = filter(&items, Filter::All).len();
        let pending = filter(&items, Filter::Pending).len();
        let purchased = filter(&items, Filter::Purchased).len();

        assert_eq!(all, items.len());
        assert_eq!(all, pending + purchased);
        assert_eq!(purchased, 2);

        let c = counts(&items);
        assert_eq!(c.total, c.pending + c.purchased);
        assert_eq!(c, ItemCounts { total: 5, pending: 3, purchased: 2 });
    }

    #[test]
    fn group_follows_taxonomy_and_keeps_order() {
        let items = sample();
        let groups = group_by_category(&items);

        let order: Vec<Category> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, vec![Category::Produce, Category::Dairy, Category::Household]);

        let produce: Vec<&str> = groups[0].1.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(produce, vec!["Apples", "Bananas"]);
        let dairy: Vec<&str> = groups[1].1.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(dairy, vec!["Milk", "Cheese"]);
    }

    #[test]
    fn group_covers_every_item_once() {
        let items = sample();
        let groups = group_by_category(&items);

        assert!(groups.iter().all(|(_, bucket)| !bucket.is_empty()));

        let mut ids: Vec<i64> = groups
            .iter()
            .flat_map(|(_, bucket)| bucket.iter().map(|item| item.id))
            .collect();
        ids.sort_unstable();
        let mut expected: Vec<i64> = items.iter().map(|item| item.id).collect();
        expected.sort_unstable();
        assert_eq!(ids, expected);
    }

    #[test]
    fn group_of_filtered_view() {
        let items = sample();
        let items = toggle_purchased(&items, items[3].id);
        let groups = group_by_category(filter(&items, Filter::Purchased));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, Category::Household);

        assert!(group_by_category(&Vec::<Item>::new()).is_empty());
    }
}
