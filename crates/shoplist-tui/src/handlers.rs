//! Keyboard event handling.

use crate::app::{App, FormField, InputMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use shoplist_core::{Filter, Storage};

/// Handle a key event. Returns true if the app should quit.
pub fn handle_key<S: Storage>(app: &mut App<S>, key: KeyEvent) -> bool {
    // Ctrl+C quits from anywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return true;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::AddItem => handle_form_key(app, key),
        InputMode::ConfirmClearAll => handle_confirm_key(app, key),
        InputMode::Share => handle_share_key(app, key),
    }
}

fn handle_normal_key<S: Storage>(app: &mut App<S>, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            app.quit();
            true
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
            false
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
            false
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            app.toggle_selected();
            false
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            app.delete_selected();
            false
        }
        KeyCode::Char('a') | KeyCode::Char('n') => {
            app.start_add();
            false
        }
        KeyCode::Char('c') => {
            app.clear_purchased();
            false
        }
        KeyCode::Char('X') => {
            app.request_clear_all();
            false
        }
        KeyCode::Char('s') => {
            app.open_share();
            false
        }
        KeyCode::Tab | KeyCode::Char('f') => {
            app.cycle_filter();
            false
        }
        KeyCode::Char('1') => {
            app.set_filter(Filter::All);
            false
        }
        KeyCode::Char('2') => {
            app.set_filter(Filter::Pending);
            false
        }
        KeyCode::Char('3') => {
            app.set_filter(Filter::Purchased);
            false
        }
        KeyCode::Esc => {
            app.status = None;
            false
        }
        _ => false,
    }
}

fn handle_form_key<S: Storage>(app: &mut App<S>, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.cancel();
            return false;
        }
        KeyCode::Enter => {
            app.submit_add();
            return false;
        }
        _ => {}
    }

    let form = &mut app.form;
    match key.code {
        KeyCode::Tab => form.field = form.field.next(),
        KeyCode::Up | KeyCode::Down => {
            let up = key.code == KeyCode::Up;
            match form.field {
                FormField::Quantity => form.step_quantity(up),
                FormField::Category => {
                    form.category = if up {
                        form.category.prev()
                    } else {
                        form.category.next()
                    };
                }
                FormField::Name => {}
            }
        }
        KeyCode::Backspace => match form.field {
            FormField::Name => {
                form.name.pop();
            }
            FormField::Quantity => {
                form.quantity.pop();
            }
            FormField::Category => {}
        },
        KeyCode::Char(c) => match form.field {
            FormField::Name => form.name.push(c),
            FormField::Quantity if c.is_ascii_digit() && form.quantity.len() < 2 => {
                form.quantity.push(c)
            }
            FormField::Category if c == ' ' => form.category = form.category.next(),
            _ => {}
        },
        _ => {}
    }
    false
}

fn handle_confirm_key<S: Storage>(app: &mut App<S>, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_clear_all(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel(),
        _ => {}
    }
    false
}

fn handle_share_key<S: Storage>(app: &mut App<S>, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('y') | KeyCode::Enter => app.copy_share_link(),
        KeyCode::Esc | KeyCode::Char('q') => app.cancel(),
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoplist_core::{Category, ListStore, MemoryStorage, Session};
    use url::Url;

    fn app() -> App<MemoryStorage> {
        App::new(
            Session::open(ListStore::new(MemoryStorage::new())),
            Url::parse("https://lists.example/").unwrap(),
            Filter::All,
        )
    }

    fn press(app: &mut App<MemoryStorage>, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App<MemoryStorage>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn add_form_via_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.input_mode, InputMode::AddItem);

        type_text(&mut app, "Milk");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "2x");
        press(&mut app, KeyCode::Tab);
        // Other -> Dairy, walking the taxonomy backwards
        for _ in 0..7 {
            press(&mut app, KeyCode::Up);
        }
        assert_eq!(app.form.category, Category::Dairy);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        let item = &app.session.items()[0];
        assert_eq!(item.name, "Milk");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.category, Category::Dairy);
    }

    #[test]
    fn toggle_delete_and_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Bread");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char(' '));
        assert!(app.session.items()[0].purchased);

        press(&mut app, KeyCode::Char('d'));
        assert!(app.session.items().is_empty());

        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn ctrl_c_quits_from_form() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        let quit = handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(quit);
    }

    #[test]
    fn clear_all_confirmation_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Tea");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('X'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.session.items().len(), 1);

        press(&mut app, KeyCode::Char('X'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.session.items().is_empty());
    }
}
