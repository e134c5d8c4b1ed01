use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, BulkAction, Mode};

use super::open_select_dialog;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') => open_add_dialog(app),
        KeyCode::Char('m') => open_select_dialog(app, BulkAction::Mark),
        KeyCode::Char('d') => open_select_dialog(app, BulkAction::Delete),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn open_add_dialog(app: &mut App) {
    app.input.clear();
    app.status_message = None;
    app.mode = Mode::Add;
}
