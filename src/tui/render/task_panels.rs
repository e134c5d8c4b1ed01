use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::model::Task;
use crate::tui::app::App;

/// Control panel, uncompleted list and completed list, side by side
pub fn render_task_panels(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let pending = app.store.get_uncompleted_tasks();
    let completed = app.store.get_completed_tasks();

    render_control_panel(frame, app, columns[0], pending.len(), completed.len());
    render_task_list(
        frame,
        app,
        columns[1],
        "Uncompleted Tasks",
        app.theme.red,
        &pending,
        "No uncompleted tasks",
    );
    render_task_list(
        frame,
        app,
        columns[2],
        "Completed Tasks",
        app.theme.green,
        &completed,
        "No completed tasks",
    );
}

fn panel_block(app: &App, title: &str, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(app.theme.background))
}

fn render_control_panel(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    pending: usize,
    completed: usize,
) {
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text);

    let mut lines: Vec<Line> = [
        ("a", "Add New Task"),
        ("m", "Mark Tasks"),
        ("d", "Delete Tasks"),
        ("?", "Help"),
        ("q", "Exit"),
    ]
    .into_iter()
    .map(|(key, desc)| {
        Line::from(vec![
            Span::styled(format!(" {}  ", key), key_style),
            Span::styled(desc, desc_style),
        ])
    })
    .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(" {} open, {} done", pending, completed),
        Style::default().fg(app.theme.dim),
    )));

    let block = panel_block(app, "Control Panel", app.theme.text_bright);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_task_list(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    color: Color,
    tasks: &[Task],
    placeholder: &str,
) {
    let block = panel_block(app, title, color);

    let lines: Vec<Line> = if tasks.is_empty() {
        vec![Line::from(Span::styled(
            placeholder.to_string(),
            Style::default().fg(app.theme.dim),
        ))]
    } else {
        tasks
            .iter()
            .enumerate()
            .map(|(i, task)| {
                Line::from(Span::styled(
                    super::task_label(i, &task.title),
                    Style::default().fg(app.theme.text_bright),
                ))
            })
            .collect()
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
