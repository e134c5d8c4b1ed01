use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::{display_width, tail_to_width, truncate_to_width};

const DIALOG_WIDTH: u16 = 56;
const DIALOG_HEIGHT: u16 = 7;
const PROMPT: &str = " > ";

/// "Add New Task" dialog with the title being typed
pub fn render_add_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let popup = super::fixed_centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight))
        .title(
            Line::from(Span::styled(
                " Add New Task ",
                Style::default()
                    .fg(app.theme.text_bright)
                    .add_modifier(Modifier::BOLD),
            ))
            .centered(),
        )
        .style(Style::default().bg(app.theme.background));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let can_submit = !app.input.text().trim().is_empty();
    let confirm_style = if can_submit {
        Style::default()
            .fg(app.theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim)
    };

    let lines = vec![
        Line::from(Span::styled(
            " Enter task name:",
            Style::default().fg(app.theme.text),
        )),
        Line::from(""),
        input_line(app, inner.width as usize),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter add", confirm_style),
            Span::styled("  Esc cancel", Style::default().fg(app.theme.dim)),
        ])
        .alignment(Alignment::Center),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Prompt, text and cursor. Scrolls horizontally so the cursor stays visible.
fn input_line(app: &App, width: usize) -> Line<'static> {
    let text = app.input.text();
    let cursor = app.input.cursor.min(text.len());
    let (before, after) = text.split_at(cursor);

    // One cell for the cursor block
    let room = width.saturating_sub(display_width(PROMPT) + 1);
    let before = tail_to_width(before, room);
    let after = truncate_to_width(after, room - display_width(before));

    let text_style = Style::default().fg(app.theme.text_bright);
    Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(app.theme.highlight)),
        Span::styled(before.to_string(), text_style),
        Span::styled("\u{258C}", Style::default().fg(app.theme.highlight)),
        Span::styled(after, text_style),
    ])
}
