//! The task store: every task, the selection used by bulk-action dialogs,
//! and the JSON file behind them.
//!
//! The store never fails on bad input. A missing, empty or corrupt file is
//! replaced by an empty document and the session starts with no tasks; the
//! details go to the log and to [`TaskStore::last_load`].

pub mod ids;
pub mod selection;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{error, info, warn};

use crate::io::data_file::{self, DataFile, EMPTY_DOCUMENT};
use crate::model::task::Task;

pub use ids::{IdGenerator, UuidGenerator};
pub use selection::Selection;

/// Error type for writing the data file
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize tasks: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Why a load fell back to an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetReason {
    Empty,
    NotAnObject,
    Malformed(String),
}

/// What [`TaskStore::load`] did with the data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Tasks were read; `skipped` entries failed validation
    Loaded { tasks: usize, skipped: usize },
    /// No file existed, an empty one was created
    Created,
    /// The file was unusable and has been rewritten empty
    Reset(ResetReason),
    /// The file exists but could not be read; it was left alone
    Unreadable(String),
}

impl LoadOutcome {
    /// A user-facing note when the load lost or ignored data
    pub fn notice(&self) -> Option<String> {
        match self {
            LoadOutcome::Loaded { skipped: 0, .. } | LoadOutcome::Created => None,
            LoadOutcome::Loaded { skipped, .. } => Some(format!(
                "skipped {} invalid task{} in data file",
                skipped,
                if *skipped == 1 { "" } else { "s" }
            )),
            LoadOutcome::Reset(ResetReason::Empty) => None,
            LoadOutcome::Reset(ResetReason::NotAnObject) => {
                Some("data file had the wrong shape and was reset".to_string())
            }
            LoadOutcome::Reset(ResetReason::Malformed(_)) => {
                Some("data file was corrupt and was reset".to_string())
            }
            LoadOutcome::Unreadable(msg) => Some(format!("could not read data file: {}", msg)),
        }
    }
}

/// In-memory task list backed by a JSON file.
///
/// Every mutation is written through immediately. Dropping the store saves
/// one last time, except when the file could not be read and no task has
/// changed since.
pub struct TaskStore {
    path: PathBuf,
    tasks: IndexMap<String, Task>,
    /// Present only while a selection dialog is open
    selection: Option<Selection>,
    ids: Box<dyn IdGenerator>,
    last_load: Option<LoadOutcome>,
    save_error: Option<String>,
    /// The file could not be read; leave it alone until a task changes
    guard_unreadable: bool,
}

impl TaskStore {
    /// Open the store at `path` with random UUID ids and load it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_generator(path, UuidGenerator)
    }

    /// Open the store at `path` with a custom id source and load it.
    pub fn with_generator(path: impl Into<PathBuf>, ids: impl IdGenerator + 'static) -> Self {
        let mut store = TaskStore {
            path: path.into(),
            tasks: IndexMap::new(),
            selection: None,
            ids: Box::new(ids),
            last_load: None,
            save_error: None,
            guard_unreadable: false,
        };
        store.load();
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Replace the in-memory tasks with the file contents.
    ///
    /// Never fails: anything unusable is logged and the store ends up empty.
    pub fn load(&mut self) -> LoadOutcome {
        self.tasks.clear();
        let path = self.path.display().to_string();

        let outcome = match data_file::read_data_file(&self.path) {
            DataFile::Missing => {
                info!("event=store_load status=created path={}", path);
                self.write_empty();
                LoadOutcome::Created
            }
            DataFile::Unreadable(e) => {
                error!("event=store_load status=error path={} error={}", path, e);
                LoadOutcome::Unreadable(e.to_string())
            }
            DataFile::Empty => {
                warn!("event=store_load status=reset reason=empty path={}", path);
                self.write_empty();
                LoadOutcome::Reset(ResetReason::Empty)
            }
            DataFile::NotAnObject => {
                warn!(
                    "event=store_load status=reset reason=not_an_object path={}",
                    path
                );
                self.write_empty();
                LoadOutcome::Reset(ResetReason::NotAnObject)
            }
            DataFile::Malformed(msg) => {
                error!(
                    "event=store_load status=reset reason=parse_error path={} error={}",
                    path, msg
                );
                self.write_empty();
                LoadOutcome::Reset(ResetReason::Malformed(msg))
            }
            DataFile::Entries(entries) => {
                let (tasks, skipped) = data_file::parse_entries(entries);
                for entry in &skipped {
                    warn!(
                        "event=store_load_entry status=skipped path={} id={:?} reason={}",
                        path, entry.id, entry.reason
                    );
                }
                self.tasks = tasks;
                info!(
                    "event=store_load status=ok path={} tasks={} skipped={}",
                    path,
                    self.tasks.len(),
                    skipped.len()
                );
                LoadOutcome::Loaded {
                    tasks: self.tasks.len(),
                    skipped: skipped.len(),
                }
            }
        };

        self.guard_unreadable = matches!(outcome, LoadOutcome::Unreadable(_));
        self.last_load = Some(outcome.clone());
        outcome
    }

    /// Write every task to the file, replacing its contents.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let result = data_file::render_document(&self.tasks)
            .map_err(StoreError::from)
            .and_then(|content| self.write(&content));
        self.save_error = result.as_ref().err().map(|e| e.to_string());
        result
    }

    /// Outcome of the most recent [`load`](Self::load)
    pub fn last_load(&self) -> Option<&LoadOutcome> {
        self.last_load.as_ref()
    }

    /// Message of the last failed write, cleared by the next successful one
    pub fn save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }

    fn write(&self, content: &[u8]) -> Result<(), StoreError> {
        data_file::write_document(&self.path, content).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })
    }

    fn write_empty(&mut self) {
        let result = self.write(EMPTY_DOCUMENT.as_bytes());
        if let Err(e) = &result {
            error!("event=store_reset_write status=error error={}", e);
        }
        self.save_error = result.err().map(|e| e.to_string());
    }

    /// Save after a mutation; failures are logged, memory is kept.
    fn persist(&mut self) {
        if self.guard_unreadable {
            return;
        }
        if let Err(e) = self.save() {
            error!("event=store_save status=error error={}", e);
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Add a new open task and return its id. The title is stored as given.
    pub fn add_task(&mut self, title: &str) -> String {
        let id = self.ids.generate_id();
        self.tasks.insert(id.clone(), Task::new(id.clone(), title));
        self.guard_unreadable = false;
        info!("event=task_add status=ok id={}", id);
        self.persist();
        id
    }

    /// Remove a task. Unknown ids are ignored.
    pub fn delete_task(&mut self, id: &str) {
        if self.tasks.shift_remove(id).is_some() {
            self.guard_unreadable = false;
            info!("event=task_delete status=ok id={}", id);
        }
        if let Some(selection) = &mut self.selection {
            selection.forget(id);
        }
        self.persist();
    }

    /// Flip a task between open and done. Unknown ids are ignored.
    pub fn toggle_task_status(&mut self, id: &str) {
        let Some(task) = self.tasks.get_mut(id) else {
            return;
        };
        task.done = !task.done;
        self.guard_unreadable = false;
        info!("event=task_toggle status=ok id={} done={}", id, task.done);
        self.persist();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn contains_task(&self, id: &str) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn get_all_tasks(&self) -> Vec<Task> {
        self.tasks.values().cloned().collect()
    }

    pub fn get_uncompleted_tasks(&self) -> Vec<Task> {
        self.tasks.values().filter(|t| !t.done).cloned().collect()
    }

    pub fn get_completed_tasks(&self) -> Vec<Task> {
        self.tasks.values().filter(|t| t.done).cloned().collect()
    }

    /// Look up a task. `None` when the id is unknown.
    pub fn get_task_info(&self, id: &str) -> Option<Task> {
        self.tasks.get(id).cloned()
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Start a fresh selection with every current task unselected.
    pub fn init_selection_states(&mut self) {
        self.selection = Some(Selection::seeded(self.tasks.keys().cloned()));
    }

    pub fn toggle_task_selection(&mut self, id: &str) {
        self.selection
            .get_or_insert_with(Selection::default)
            .toggle(id);
    }

    pub fn is_task_selected(&self, id: &str) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|selection| selection.is_selected(id))
    }

    /// Unselect everything without dropping the entries.
    pub fn clear_selection(&mut self) {
        if let Some(selection) = &mut self.selection {
            selection.clear();
        }
    }

    pub fn get_selected_task_ids(&self) -> Vec<String> {
        self.selection
            .as_ref()
            .map(Selection::selected_ids)
            .unwrap_or_default()
    }

    pub fn has_selection(&self) -> bool {
        self.selection.as_ref().is_some_and(Selection::any)
    }

    /// Drop the selection once its dialog has closed.
    pub fn dismiss_selection(&mut self) {
        self.selection = None;
    }

    pub fn selection_active(&self) -> bool {
        self.selection.is_some()
    }
}

impl Drop for TaskStore {
    fn drop(&mut self) {
        if self.guard_unreadable {
            info!(
                "event=store_save status=skipped phase=shutdown reason=unreadable path={}",
                self.path.display()
            );
            return;
        }
        if let Err(e) = self.save() {
            error!("event=store_save status=error phase=shutdown error={}", e);
        }
    }
}
