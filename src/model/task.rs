/// A single todo item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Task {
    /// Opaque unique identifier, assigned once at creation
    pub id: String,
    /// Task description as typed by the user
    pub title: String,
    /// Completion status
    pub done: bool,
}

impl Task {
    /// Create a new, not yet completed task
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Task {
            id: id.into(),
            title: title.into(),
            done: false,
        }
    }

    /// Same task with the given completion status
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    /// Short form of the id for display (first 8 characters)
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }
}
