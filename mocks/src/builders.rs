//! Builder pattern implementations for easy test data construction

use task_core::{CreateTaskRequest, MarkCompleteRequest, NewTask, Task};

/// Builder for constructing Task instances in tests
pub struct TaskBuilder {
    task: Task,
}

impl Default for TaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskBuilder {
    /// Create new builder with default values
    pub fn new() -> Self {
        Self {
            task: Task::new(1, "Test Task".to_string(), false),
        }
    }

    /// Set task ID
    pub fn with_id(mut self, id: u64) -> Self {
        self.task.id = id;
        self
    }

    /// Set task name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.task.name = name.into();
        self
    }

    /// Mark the task complete
    pub fn completed(mut self) -> Self {
        self.task.complete = true;
        self
    }

    /// Build the Task
    pub fn build(self) -> Task {
        self.task
    }
}

/// Builder for NewTask instances
pub struct NewTaskBuilder {
    name: String,
}

impl Default for NewTaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewTaskBuilder {
    pub fn new() -> Self {
        Self {
            name: "New Task".to_string(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn build(self) -> NewTask {
        NewTask::new(self.name)
    }

    /// Build the matching `PUT /tasks/create` body
    pub fn build_request(self) -> CreateTaskRequest {
        CreateTaskRequest { name: self.name }
    }
}

/// Build a `POST /tasks/mark-complete` body
pub fn mark_complete_request(id: u64, completed: bool) -> MarkCompleteRequest {
    MarkCompleteRequest { id, completed }
}
