use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::info;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::model::Task;
use crate::store::TaskStore;
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Main three-panel view
    Navigate,
    /// "Add New Task" dialog
    Add,
    /// Bulk selection dialog (see `App::dialog`)
    Select,
}

/// What a confirmed selection dialog does to each checked task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Mark,
    Delete,
}

impl BulkAction {
    pub fn title(self) -> &'static str {
        match self {
            BulkAction::Mark => "Mark Tasks",
            BulkAction::Delete => "Delete Tasks",
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            BulkAction::Mark => "marked",
            BulkAction::Delete => "deleted",
        }
    }
}

/// The two lists shown side by side in a selection dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Pending,
    Completed,
}

impl Column {
    pub fn other(self) -> Self {
        match self {
            Column::Pending => Column::Completed,
            Column::Completed => Column::Pending,
        }
    }
}

/// Cursor state of an open selection dialog. Which tasks are checked lives
/// in the store, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectDialog {
    pub action: BulkAction,
    pub column: Column,
    pub pending_cursor: usize,
    pub completed_cursor: usize,
}

impl SelectDialog {
    pub fn new(action: BulkAction) -> Self {
        SelectDialog {
            action,
            column: Column::Pending,
            pending_cursor: 0,
            completed_cursor: 0,
        }
    }

    pub fn cursor(&self, column: Column) -> usize {
        match column {
            Column::Pending => self.pending_cursor,
            Column::Completed => self.completed_cursor,
        }
    }

    pub fn cursor_mut(&mut self, column: Column) -> &mut usize {
        match column {
            Column::Pending => &mut self.pending_cursor,
            Column::Completed => &mut self.completed_cursor,
        }
    }
}

/// Single-line text buffer with a grapheme-aware cursor (byte offset)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub buffer: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(self.cursor..next, "");
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Text typed into the add dialog
    pub input: TextInput,
    /// Open selection dialog, if any
    pub dialog: Option<SelectDialog>,
    /// Help overlay visible
    pub show_help: bool,
    /// One-line message for the status row
    pub status_message: Option<String>,
}

impl App {
    pub fn new(store: TaskStore, theme: Theme) -> Self {
        let status_message = store.last_load().and_then(|outcome| outcome.notice());
        App {
            store,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            input: TextInput::default(),
            dialog: None,
            show_help: false,
            status_message,
        }
    }

    /// Tasks shown in one column of the selection dialog, fetched fresh
    pub fn column_tasks(&self, column: Column) -> Vec<Task> {
        match column {
            Column::Pending => self.store.get_uncompleted_tasks(),
            Column::Completed => self.store.get_completed_tasks(),
        }
    }

    /// The task under the dialog cursor in the active column
    pub fn cursor_task(&self) -> Option<Task> {
        let dialog = self.dialog.as_ref()?;
        let tasks = self.column_tasks(dialog.column);
        let idx = dialog.cursor(dialog.column).min(tasks.len().checked_sub(1)?);
        tasks.into_iter().nth(idx)
    }
}

/// Run the TUI application
pub fn run(store: TaskStore, theme: Theme) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(store, theme);
    info!(
        "event=tui_start status=ok path={} tasks={}",
        app.store.path().display(),
        app.store.len()
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("event=tui_exit status=ok tasks={}", app.store.len());
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
