use serde::{Deserialize, Serialize};

/// Core task representation.
///
/// A task is a named unit of work with a completion flag. The `id` is assigned
/// by the database on insert and never changes afterwards.
///
/// # Examples
///
/// ```rust
/// use task_core::models::Task;
///
/// let mut task = Task::new(1, "Buy milk".to_string(), false);
/// task.set_complete(true);
///
/// assert!(task.complete);
/// assert_eq!(task.completion_label(), "complete");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Auto-increment primary key
    pub id: u64,
    /// Label provided by the client at creation
    pub name: String,
    /// Completion flag, false until marked complete
    #[serde(default)]
    pub complete: bool,
}

impl Task {
    /// Create a task from its stored columns
    pub fn new(id: u64, name: String, complete: bool) -> Self {
        Self { id, name, complete }
    }

    /// Set the completion flag
    pub fn set_complete(&mut self, complete: bool) {
        self.complete = complete;
    }

    /// Human-readable name of the current completion state
    pub fn completion_label(&self) -> &'static str {
        if self.complete {
            "complete"
        } else {
            "incomplete"
        }
    }
}

/// Data transfer object for creating new tasks.
///
/// Only the name is client-supplied; `id` and `complete` are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTask {
    pub name: String,
}

impl NewTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Build the stored task once the database has assigned an id
    pub fn into_task(self, id: u64) -> Task {
        Task::new(id, self.name, false)
    }
}
