use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

pub(super) fn handle_add(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => submit_add(app),
        KeyCode::Esc => {
            app.input.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Backspace => app.input.backspace(),
        KeyCode::Delete => app.input.delete(),
        KeyCode::Left => app.input.left(),
        KeyCode::Right => app.input.right(),
        KeyCode::Home => app.input.home(),
        KeyCode::End => app.input.end(),
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.input.insert(c)
        }
        _ => {}
    }
}

/// Add the typed title. Blank input keeps the dialog open.
fn submit_add(app: &mut App) {
    let title = app.input.text().trim().to_string();
    if title.is_empty() {
        return;
    }
    app.store.add_task(&title);
    app.status_message = Some(format!("added \"{}\"", title));
    app.input.clear();
    app.mode = Mode::Navigate;
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use crate::tui::app::Mode;
    use crate::tui::input::test_keys::*;
    use crate::tui::render::test_helpers::app_with_tasks;

    #[test]
    fn enter_adds_trimmed_title() {
        let (_dir, mut app) = app_with_tasks(&[]);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "  Buy milk  ");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Navigate);
        let open = app.store.get_uncompleted_tasks();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].title, "Buy milk");
        assert_eq!(app.status_message.as_deref(), Some("added \"Buy milk\""));
    }

    #[test]
    fn blank_title_is_rejected() {
        let (_dir, mut app) = app_with_tasks(&[]);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Add);
        assert!(app.store.is_empty());
    }

    #[test]
    fn esc_discards_input() {
        let (_dir, mut app) = app_with_tasks(&[]);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Never mind");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.store.is_empty());
        assert_eq!(app.input.text(), "");
    }

    #[test]
    fn editing_keys_move_and_delete() {
        let (_dir, mut app) = app_with_tasks(&[]);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Wrte");
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        type_str(&mut app, "i");
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "e report");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.get_all_tasks()[0].title, "Write report");
    }

    #[test]
    fn letters_that_are_shortcuts_elsewhere_are_typed() {
        let (_dir, mut app) = app_with_tasks(&[]);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "mad?q");
        assert_eq!(app.input.text(), "mad?q");
        assert_eq!(app.mode, Mode::Add);
    }
}
