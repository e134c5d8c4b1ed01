use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    // A failed save outranks everything else
    let (message, style) = if let Some(err) = app.store.save_error() {
        (
            format!(" changes not saved: {}", err),
            Style::default()
                .fg(app.theme.red)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )
    } else if let Some(msg) = &app.status_message {
        (
            format!(" {}", msg),
            Style::default().fg(app.theme.yellow).bg(bg),
        )
    } else {
        (String::new(), Style::default().bg(bg))
    };

    let hint = match app.mode {
        Mode::Navigate => "a add  m mark  d delete  ? help  q quit ",
        Mode::Add => "Enter add  Esc cancel ",
        Mode::Select => "Space select  Enter confirm  Esc cancel ",
    };

    let mut spans = Vec::new();
    let hint_width = display_width(hint);
    if display_width(&message) + hint_width < width {
        let padding = width - display_width(&message) - hint_width;
        spans.push(Span::styled(message, style));
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            hint,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        // No room for the hint; the message wins
        spans.push(Span::styled(truncate_to_width(&message, width), style));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crossterm::event::KeyCode;

    use crate::tui::input::test_keys::*;
    use crate::tui::render::test_helpers::*;

    fn last_line(output: &str) -> &str {
        output.lines().last().unwrap_or_default()
    }

    #[test]
    fn navigate_mode_shows_key_hints() {
        let (_dir, mut app) = app_with_tasks(&[]);
        let output = render_app(&mut app);
        assert!(last_line(&output).contains("a add  m mark  d delete"));
    }

    #[test]
    fn status_message_shows_after_add() {
        let (_dir, mut app) = app_with_tasks(&[]);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Walk dog");
        press(&mut app, KeyCode::Enter);
        let output = render_app(&mut app);
        assert!(last_line(&output).contains("added \"Walk dog\""));
    }

    #[test]
    fn save_error_takes_priority() {
        let (dir, mut app) = app_with_tasks(&[]);
        app.status_message = Some("hello".into());
        // Turn the data file into a directory so the next write fails
        let path = dir.path().join("data.json");
        let _ = fs::remove_file(&path);
        fs::create_dir(&path).unwrap();
        app.store.add_task("Doomed");

        let output = render_app(&mut app);
        let status = last_line(&output);
        assert!(status.contains("changes not saved"));
        assert!(!status.contains("hello"));
    }
}
