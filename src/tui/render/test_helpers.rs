use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::store::TaskStore;
use crate::tui::app::App;
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 90;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An app over a fresh store in a temp dir, with ids `T1`, `T2`, ...
/// The `TempDir` must outlive the app.
pub fn app_with_tasks(tasks: &[(&str, bool)]) -> (TempDir, App) {
    let dir = TempDir::new().unwrap();
    let mut n = 0;
    let mut store = TaskStore::with_generator(dir.path().join("data.json"), move || {
        n += 1;
        format!("T{}", n)
    });
    for (title, done) in tasks {
        let id = store.add_task(title);
        if *done {
            store.toggle_task_status(&id);
        }
    }
    (dir, App::new(store, Theme::default()))
}

/// Render the whole screen of `app`.
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _area| {
        super::render(frame, app);
    })
}
