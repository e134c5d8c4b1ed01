//! On-disk format of the task list.
//!
//! The file is a JSON object keyed by task id:
//!
//! ```json
//! {
//!     "3F2504E0-4F89-41D3-9A0C-0305E82C3301": {
//!         "title": "Buy milk",
//!         "done": false
//!     }
//! }
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::error::Category;

use crate::model::task::Task;

/// Contents written whenever the file has to be (re)created empty.
pub const EMPTY_DOCUMENT: &str = "{}";

/// What was found at the data file path.
#[derive(Debug)]
pub enum DataFile {
    /// No file at the path
    Missing,
    /// The file exists but could not be read
    Unreadable(io::Error),
    /// Zero bytes or only whitespace
    Empty,
    /// Valid JSON whose top level is not an object
    NotAnObject,
    /// Syntax error, truncated document, or invalid UTF-8
    Malformed(String),
    /// Top-level object, entries not yet validated
    Entries(IndexMap<String, Value>),
}

/// Why a single entry was left out of the loaded task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingFields,
    InvalidData(String),
    EmptyId,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingFields => write!(f, "missing required fields"),
            SkipReason::InvalidData(msg) => write!(f, "invalid data: {}", msg),
            SkipReason::EmptyId => write!(f, "empty id"),
        }
    }
}

/// An entry that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub id: String,
    pub reason: SkipReason,
}

#[derive(Deserialize)]
struct TaskRecord {
    title: String,
    done: bool,
}

#[derive(Serialize)]
struct TaskRecordRef<'a> {
    title: &'a str,
    done: bool,
}

/// Read and classify the data file without touching it.
pub fn read_data_file(path: &Path) -> DataFile {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return DataFile::Missing,
        Err(e) => return DataFile::Unreadable(e),
    };
    classify(&bytes)
}

/// Classify raw file contents.
pub fn classify(bytes: &[u8]) -> DataFile {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return DataFile::Empty;
    }
    match serde_json::from_slice::<IndexMap<String, Value>>(bytes) {
        Ok(entries) => DataFile::Entries(entries),
        // A well-formed document of the wrong type (array, string, null...)
        Err(e) if e.classify() == Category::Data => DataFile::NotAnObject,
        Err(e) => DataFile::Malformed(e.to_string()),
    }
}

/// Validate entries one by one. Bad entries are reported, never fatal.
pub fn parse_entries(entries: IndexMap<String, Value>) -> (IndexMap<String, Task>, Vec<SkippedEntry>) {
    let mut tasks = IndexMap::with_capacity(entries.len());
    let mut skipped = Vec::new();

    for (id, value) in entries {
        match parse_entry(&id, value) {
            Ok(task) => {
                tasks.insert(id, task);
            }
            Err(reason) => skipped.push(SkippedEntry { id, reason }),
        }
    }

    (tasks, skipped)
}

fn parse_entry(id: &str, value: Value) -> Result<Task, SkipReason> {
    if id.is_empty() {
        return Err(SkipReason::EmptyId);
    }
    let has_fields = value
        .as_object()
        .is_some_and(|fields| fields.contains_key("title") && fields.contains_key("done"));
    if !has_fields {
        return Err(SkipReason::MissingFields);
    }
    let record: TaskRecord =
        serde_json::from_value(value).map_err(|e| SkipReason::InvalidData(e.to_string()))?;
    Ok(Task::new(id, record.title).with_done(record.done))
}

/// Serialize the task map, pretty-printed with four-space indentation.
pub fn render_document(tasks: &IndexMap<String, Task>) -> Result<Vec<u8>, serde_json::Error> {
    let records: IndexMap<&str, TaskRecordRef<'_>> = tasks
        .iter()
        .map(|(id, task)| {
            (
                id.as_str(),
                TaskRecordRef {
                    title: &task.title,
                    done: task.done,
                },
            )
        })
        .collect();

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    records.serialize(&mut serializer)?;
    Ok(out)
}

/// Overwrite the file in full.
pub fn write_document(path: &Path, content: &[u8]) -> io::Result<()> {
    fs::write(path, content)
}
