//! Custom assertion helpers for testing

use task_core::Task;

/// Assert a task has the expected name and completion flag, whatever its ID
pub fn assert_task_matches(task: &Task, name: &str, complete: bool) {
    assert_eq!(task.name, name, "Task names don't match");
    assert_eq!(task.complete, complete, "Task completion flags don't match");
}

/// Assert task list contains a task with specific ID
pub fn assert_contains_task_id(tasks: &[Task], id: u64) {
    assert!(
        tasks.iter().any(|task| task.id == id),
        "Task list does not contain task with ID {}. IDs present: {:?}",
        id,
        tasks.iter().map(|task| task.id).collect::<Vec<_>>()
    );
}

/// Assert no two tasks share an ID
pub fn assert_unique_ids(tasks: &[Task]) {
    let mut ids: Vec<u64> = tasks.iter().map(|task| task.id).collect();
    ids.sort_unstable();
    let before = ids.len();
    ids.dedup();
    assert_eq!(before, ids.len(), "Task list contains duplicate IDs");
}
