use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, Column, SelectDialog};
use crate::util::unicode::truncate_to_width;

/// Width of the ` [x] ` marker in front of each row
const MARKER_WIDTH: usize = 5;

/// Bulk "Mark Tasks" / "Delete Tasks" dialog
pub fn render_select_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let Some(dialog) = app.dialog.as_ref() else {
        return;
    };

    let popup = super::centered_rect(80, 80, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight))
        .title(
            Line::from(Span::styled(
                format!(" {} ", dialog.action.title()),
                Style::default()
                    .fg(app.theme.text_bright)
                    .add_modifier(Modifier::BOLD),
            ))
            .centered(),
        )
        .style(Style::default().bg(app.theme.background));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    render_column(
        frame,
        app,
        dialog,
        Column::Pending,
        "To Complete",
        app.theme.red,
        columns[0],
    );
    render_column(
        frame,
        app,
        dialog,
        Column::Completed,
        "Completed",
        app.theme.green,
        columns[1],
    );
    render_footer(frame, app, rows[1]);
}

fn render_column(
    frame: &mut Frame,
    app: &App,
    dialog: &SelectDialog,
    column: Column,
    heading: &str,
    color: Color,
    area: Rect,
) {
    let active = dialog.column == column;
    let border_color = if active {
        app.theme.highlight
    } else {
        app.theme.dim
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            format!(" {} ", heading),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let tasks = app.column_tasks(column);
    if tasks.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(" (none)", Style::default().fg(app.theme.dim))),
            inner,
        );
        return;
    }

    let height = inner.height as usize;
    let cursor = dialog.cursor(column).min(tasks.len() - 1);
    // Keep the cursor row on screen
    let offset = cursor.saturating_sub(height.saturating_sub(1));
    let label_width = (inner.width as usize).saturating_sub(MARKER_WIDTH);

    let lines: Vec<Line> = tasks
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, task)| {
            let checked = app.store.is_task_selected(&task.id);
            let bg = if active && i == cursor {
                app.theme.selection_bg
            } else {
                app.theme.background
            };
            let (marker, marker_color) = if checked {
                (" [x] ", app.theme.highlight)
            } else {
                (" [ ] ", app.theme.dim)
            };
            let label = truncate_to_width(&super::task_label(i, &task.title), label_width);
            Line::from(vec![
                Span::styled(marker, Style::default().fg(marker_color).bg(bg)),
                Span::styled(label, Style::default().fg(app.theme.text_bright).bg(bg)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    // Confirm does nothing until a task is checked
    let confirm_style = if app.store.has_selection() {
        Style::default()
            .fg(app.theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim)
    };
    let hint_style = Style::default().fg(app.theme.dim);

    let line = Line::from(vec![
        Span::styled("Enter confirm", confirm_style),
        Span::styled("  Space select  Tab switch  Esc cancel", hint_style),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
