pub mod add_dialog;
pub mod help_overlay;
pub mod select_dialog;
pub mod status_row;
pub mod task_panels;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: panels | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    task_panels::render_task_panels(frame, app, chunks[0]);

    match app.mode {
        Mode::Navigate => {}
        Mode::Add => add_dialog::render_add_dialog(frame, app, area),
        Mode::Select => select_dialog::render_select_dialog(frame, app, area),
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[1]);
}

/// `1. title` with line breaks flattened so a task stays on its own row.
pub(super) fn task_label(index: usize, title: &str) -> String {
    format!("{}. {}", index + 1, title.replace(['\n', '\r'], " "))
}

/// A rect of `percent_x` by `percent_y` centered in `area`.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// A fixed-size rect centered in `area`, shrunk to fit if needed.
pub(super) fn fixed_centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;

    #[test]
    fn task_label_is_numbered_and_single_line() {
        assert_eq!(task_label(0, "Buy milk"), "1. Buy milk");
        assert_eq!(task_label(9, "a\nb"), "10. a b");
    }

    #[test]
    fn fixed_rect_centers_and_clamps() {
        let area = Rect::new(0, 0, 80, 20);
        assert_eq!(fixed_centered_rect(40, 10, area), Rect::new(20, 5, 40, 10));
        assert_eq!(fixed_centered_rect(100, 30, area), area);
    }

    #[test]
    fn main_screen_shows_three_panels() {
        let (_dir, mut app) = app_with_tasks(&[("Buy milk", false), ("Call mom", true)]);
        let output = render_app(&mut app);
        assert!(output.contains("Control Panel"));
        assert!(output.contains("Uncompleted Tasks"));
        assert!(output.contains("Completed Tasks"));
        assert!(output.contains("1. Buy milk"));
        assert!(output.contains("1. Call mom"));
    }

    #[test]
    fn help_overlay_draws_over_panels() {
        let (_dir, mut app) = app_with_tasks(&[]);
        app.show_help = true;
        let output = render_app(&mut app);
        assert!(output.contains("Key Bindings"));
    }
}
