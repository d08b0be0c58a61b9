//! Standard test fixtures for consistent testing

use task_core::{NewTask, Task};

/// Create a basic test task with sensible defaults
pub fn create_test_task() -> Task {
    Task::new(1, "Test Task".to_string(), false)
}

/// Create a basic insert payload
pub fn create_new_task() -> NewTask {
    NewTask::new("Buy milk")
}

/// Create multiple unique tasks, every third one already complete
pub fn create_test_tasks(count: u64) -> Vec<Task> {
    (1..=count)
        .map(|i| Task::new(i, format!("Test Task {i}"), i % 3 == 0))
        .collect()
}

/// An ID no fixture or fresh store ever assigns
pub const MISSING_TASK_ID: u64 = 999_999;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_tasks() {
        let tasks = create_test_tasks(6);
        assert_eq!(tasks.len(), 6);
        assert_eq!(tasks.iter().filter(|task| task.complete).count(), 2);
        assert!(tasks.iter().all(|task| task.id != MISSING_TASK_ID));
    }
}
