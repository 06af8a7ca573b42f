//! Application state management.

use shoplist_core::{share, Category, Command, Filter, Item, Session, Storage};
use url::Url;

/// Application state.
#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    /// The list is shown and accepts input.
    Running,
    /// Application should quit.
    Quit,
}

/// Input mode for the application.
#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// The add-item form is open.
    AddItem,
    /// Waiting for confirmation before emptying the list.
    ConfirmClearAll,
    /// The share dialog is open.
    Share,
}

/// Field of the add-item form that receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Name,
    Quantity,
    Category,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Quantity,
            FormField::Quantity => FormField::Category,
            FormField::Category => FormField::Name,
        }
    }
}

/// Largest quantity the form accepts.
pub const MAX_QUANTITY: i64 = 99;

/// State of the add-item form.
#[derive(Debug, Clone, PartialEq)]
pub struct AddForm {
    pub name: String,
    pub quantity: String,
    pub category: Category,
    pub field: FormField,
}

impl Default for AddForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            quantity: "1".to_string(),
            category: Category::Other,
            field: FormField::Name,
        }
    }
}

impl AddForm {
    /// Quantity as entered, forced into `1..=MAX_QUANTITY`.
    pub fn quantity(&self) -> i64 {
        self.quantity
            .trim()
            .parse::<i64>()
            .unwrap_or(1)
            .clamp(1, MAX_QUANTITY)
    }

    pub fn step_quantity(&mut self, up: bool) {
        let current = self.quantity();
        let next = if up { current + 1 } else { current - 1 };
        self.quantity = next.clamp(1, MAX_QUANTITY).to_string();
    }

    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Main application model.
pub struct App<S> {
    /// Current application state.
    pub state: AppState,
    /// Current input mode.
    pub input_mode: InputMode,
    /// The list being edited.
    pub session: Session<S>,
    /// Active view filter.
    pub filter: Filter,
    /// Index of the selected row among visible items.
    pub selected_index: usize,
    /// Add-item form contents.
    pub form: AddForm,
    /// Page that share links are built from.
    pub location: Url,
    /// Last notice for the status line.
    pub status: Option<String>,
    /// Link to print once the terminal is restored.
    pub copied_link: Option<String>,
}

impl<S: Storage> App<S> {
    /// Create a new application instance.
    pub fn new(session: Session<S>, location: Url, filter: Filter) -> Self {
        Self {
            state: AppState::Running,
            input_mode: InputMode::Normal,
            session,
            filter,
            selected_index: 0,
            form: AddForm::default(),
            location,
            status: None,
            copied_link: None,
        }
    }

    /// Visible items in display order: grouped by category, filtered.
    pub fn visible_items(&self) -> Vec<&Item> {
        self.session
            .grouped(self.filter)
            .into_iter()
            .flat_map(|(_, items)| items)
            .collect()
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.visible_items().get(self.selected_index).copied()
    }

    /// Move selection up.
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection down.
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.visible_items().len() {
            self.selected_index += 1;
        }
    }

    /// Keep the selection on a visible row after the list changes.
    fn clamp_selection(&mut self) {
        let len = self.visible_items().len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    fn run(&mut self, command: Command) -> bool {
        let changed = self.session.dispatch(command);
        self.clamp_selection();
        if let Some(e) = self.session.take_save_error() {
            self.status = Some(format!("Could not save list: {e}"));
        }
        changed
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_item().map(|item| item.id) {
            self.run(Command::TogglePurchased(id));
        }
    }

    pub fn delete_selected(&mut self) {
        let Some((id, name)) = self
            .selected_item()
            .map(|item| (item.id, item.name.clone()))
        else {
            return;
        };
        if self.run(Command::Delete(id)) {
            self.status = Some(format!("Deleted {name}"));
        }
    }

    pub fn clear_purchased(&mut self) {
        let purchased = self.session.counts().purchased;
        if self.run(Command::ClearPurchased) {
            self.status = Some(format!("Cleared {purchased} purchased items"));
        }
    }

    /// Ask before emptying the list. Does nothing if it is already empty.
    pub fn request_clear_all(&mut self) {
        if !self.session.items().is_empty() {
            self.input_mode = InputMode::ConfirmClearAll;
        }
    }

    pub fn confirm_clear_all(&mut self) {
        self.run(Command::ClearAll);
        self.input_mode = InputMode::Normal;
        self.status = Some("Shopping list cleared".to_string());
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.selected_index = 0;
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.filter.next());
    }

    /// Open the add-item form with fresh defaults.
    pub fn start_add(&mut self) {
        self.form = AddForm::default();
        self.input_mode = InputMode::AddItem;
    }

    /// Add the item described by the form. A blank name keeps the form open.
    pub fn submit_add(&mut self) {
        if !self.form.can_submit() {
            self.form.field = FormField::Name;
            return;
        }

        let command = Command::Add {
            name: self.form.name.clone(),
            quantity: self.form.quantity(),
            category: self.form.category,
        };
        if self.run(command) {
            self.status = Some(format!("Added {}", self.form.name.trim()));
        }
        self.form = AddForm::default();
        self.input_mode = InputMode::Normal;
    }

    /// Leave any dialog or form.
    pub fn cancel(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Open the share dialog. Does nothing for an empty list.
    pub fn open_share(&mut self) {
        if !self.session.items().is_empty() {
            self.input_mode = InputMode::Share;
        }
    }

    pub fn share_url(&self) -> Url {
        self.session.share_url(&self.location)
    }

    pub fn share_message(&self) -> String {
        share::share_message(self.session.items())
    }

    /// The terminal cannot reach a clipboard, so the link is printed on exit.
    pub fn copy_share_link(&mut self) {
        self.copied_link = Some(self.share_url().to_string());
        self.status = Some("Link will be printed when you quit".to_string());
        self.input_mode = InputMode::Normal;
    }

    pub fn quit(&mut self) {
        self.state = AppState::Quit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoplist_core::{ListStore, MemoryStorage};

    fn app() -> App<MemoryStorage> {
        let session = Session::open(ListStore::new(MemoryStorage::new()));
        App::new(
            session,
            Url::parse("https://lists.example/").unwrap(),
            Filter::All,
        )
    }

    fn add(app: &mut App<MemoryStorage>, name: &str, category: Category) {
        app.start_add();
        app.form.name = name.to_string();
        app.form.category = category;
        app.submit_add();
    }

    #[test]
    fn form_quantity_is_clamped() {
        let mut form = AddForm::default();
        assert_eq!(form.quantity(), 1);

        form.quantity = "0".to_string();
        assert_eq!(form.quantity(), 1);
        form.quantity = "250".to_string();
        assert_eq!(form.quantity(), MAX_QUANTITY);
        form.quantity = "abc".to_string();
        assert_eq!(form.quantity(), 1);

        form.quantity = "99".to_string();
        form.step_quantity(true);
        assert_eq!(form.quantity, "99");
        form.quantity = "1".to_string();
        form.step_quantity(false);
        assert_eq!(form.quantity, "1");
    }

    #[test]
    fn blank_name_keeps_form_open() {
        let mut app = app();
        app.start_add();
        app.form.name = "   ".to_string();
        app.submit_add();

        assert_eq!(app.input_mode, InputMode::AddItem);
        assert!(app.session.items().is_empty());
    }

    #[test]
    fn selection_follows_grouped_order() {
        let mut app = app();
        add(&mut app, "Soap", Category::Household);
        add(&mut app, "Apples", Category::Produce);

        assert_eq!(app.selected_item().unwrap().name, "Apples");
        app.move_down();
        assert_eq!(app.selected_item().unwrap().name, "Soap");
        app.move_down();
        assert_eq!(app.selected_item().unwrap().name, "Soap");
    }

    #[test]
    fn selection_is_clamped_after_delete() {
        let mut app = app();
        add(&mut app, "Apples", Category::Produce);
        add(&mut app, "Milk", Category::Dairy);
        app.move_down();

        app.delete_selected();
        assert_eq!(app.session.items().len(), 1);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.selected_item().unwrap().name, "Apples");
    }

    #[test]
    fn clear_all_requires_confirmation() {
        let mut app = app();
        app.request_clear_all();
        assert_eq!(app.input_mode, InputMode::Normal);

        add(&mut app, "Milk", Category::Dairy);
        app.request_clear_all();
        assert_eq!(app.input_mode, InputMode::ConfirmClearAll);
        app.cancel();
        assert_eq!(app.session.items().len(), 1);

        app.request_clear_all();
        app.confirm_clear_all();
        assert!(app.session.items().is_empty());
    }

    #[test]
    fn share_needs_items_and_copy_records_link() {
        let mut app = app();
        app.open_share();
        assert_eq!(app.input_mode, InputMode::Normal);

        add(&mut app, "Milk", Category::Dairy);
        app.open_share();
        assert_eq!(app.input_mode, InputMode::Share);
        assert_eq!(app.share_message(), "Check out my shopping list with 1 items!");

        app.copy_share_link();
        let link = app.copied_link.clone().unwrap();
        assert!(link.starts_with("https://lists.example/?list="));
    }

    #[test]
    fn filter_view_hides_purchased() {
        let mut app = app();
        add(&mut app, "Milk", Category::Dairy);
        add(&mut app, "Bread", Category::Bakery);
        // Dairy sorts before bakery, so Milk is the selected row.
        app.toggle_selected();

        app.set_filter(Filter::Pending);
        let names: Vec<&str> = app.visible_items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Bread"]);

        app.clear_purchased();
        assert_eq!(app.session.items().len(), 1);
    }
}
