use crossterm::event::{KeyCode, KeyEvent};
use log::info;

use crate::tui::app::{App, BulkAction, Column, Mode, SelectDialog};

pub(super) fn handle_select(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => move_cursor(app, -1),
        KeyCode::Down | KeyCode::Char('j') => move_cursor(app, 1),
        KeyCode::Tab
        | KeyCode::BackTab
        | KeyCode::Left
        | KeyCode::Right
        | KeyCode::Char('h')
        | KeyCode::Char('l') => switch_column(app),
        KeyCode::Char(' ') => toggle_cursor_task(app),
        KeyCode::Enter => confirm_select_dialog(app),
        KeyCode::Esc | KeyCode::Char('q') => close_select_dialog(app),
        _ => {}
    }
}

/// Open the bulk dialog; every task starts unselected.
pub fn open_select_dialog(app: &mut App, action: BulkAction) {
    app.store.init_selection_states();
    let mut dialog = SelectDialog::new(action);
    // Start on the side that has something to pick
    if app.store.get_uncompleted_tasks().is_empty() && !app.store.get_completed_tasks().is_empty()
    {
        dialog.column = Column::Completed;
    }
    app.dialog = Some(dialog);
    app.status_message = None;
    app.mode = Mode::Select;
}

/// Every way out of the dialog ends here.
pub fn close_select_dialog(app: &mut App) {
    app.store.clear_selection();
    app.store.dismiss_selection();
    app.dialog = None;
    app.mode = Mode::Navigate;
}

/// Apply the dialog's action to the checked tasks. Does nothing while
/// nothing is checked.
pub fn confirm_select_dialog(app: &mut App) {
    let Some(action) = app.dialog.as_ref().map(|d| d.action) else {
        return;
    };
    if !app.store.has_selection() {
        return;
    }

    let ids = app.store.get_selected_task_ids();
    for id in &ids {
        match action {
            BulkAction::Mark => app.store.toggle_task_status(id),
            BulkAction::Delete => app.store.delete_task(id),
        }
    }
    info!(
        "event=bulk_action status=ok action={:?} count={}",
        action,
        ids.len()
    );
    app.status_message = Some(format!(
        "{} {} task{}",
        action.past_tense(),
        ids.len(),
        if ids.len() == 1 { "" } else { "s" }
    ));
    close_select_dialog(app);
}

fn move_cursor(app: &mut App, delta: isize) {
    let Some(column) = app.dialog.as_ref().map(|d| d.column) else {
        return;
    };
    let len = app.column_tasks(column).len();
    let Some(dialog) = app.dialog.as_mut() else {
        return;
    };
    let cursor = dialog.cursor_mut(column);
    if len == 0 {
        *cursor = 0;
        return;
    }
    *cursor = cursor.saturating_add_signed(delta).min(len - 1);
}

fn switch_column(app: &mut App) {
    if let Some(dialog) = app.dialog.as_mut() {
        dialog.column = dialog.column.other();
    }
}

fn toggle_cursor_task(app: &mut App) {
    if let Some(task) = app.cursor_task() {
        app.store.toggle_task_selection(&task.id);
    }
}
