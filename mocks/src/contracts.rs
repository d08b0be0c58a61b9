//! Contract test helpers for validating trait implementations
//!
//! Provides standardized tests that any TaskRepository implementation
//! should pass. Each helper expects a repository that starts empty.

use crate::{assert_contains_task_id, assert_task_matches, assert_unique_ids, MISSING_TASK_ID};
use task_core::{NewTask, TaskRepository};

/// Test any TaskRepository implementation with the full contract suite
pub async fn test_repository_contract<R: TaskRepository>(repo: &R) {
    test_empty_list_contract(repo).await;
    test_create_contract(repo).await;
    test_get_contract(repo).await;
    test_update_contract(repo).await;
    test_list_contract(repo).await;
    test_health_check_contract(repo).await;
}

/// An empty store lists as an empty collection, not an error
pub async fn test_empty_list_contract<R: TaskRepository>(repo: &R) {
    let tasks = repo.list().await.expect("List should succeed");
    assert!(tasks.is_empty(), "Fresh repository should be empty");
}

/// Test task creation contract
pub async fn test_create_contract<R: TaskRepository>(repo: &R) {
    let first = repo
        .create(NewTask::new("Buy milk"))
        .await
        .expect("Create should succeed");
    let second = repo
        .create(NewTask::new("Buy milk"))
        .await
        .expect("Duplicate names are allowed");

    assert!(first.id > 0, "Created task should have positive ID");
    assert_ne!(first.id, second.id, "Each insert gets a fresh ID");
    assert_task_matches(&first, "Buy milk", false);
}

/// Test retrieval by ID
pub async fn test_get_contract<R: TaskRepository>(repo: &R) {
    let created = repo
        .create(NewTask::new("Walk dog"))
        .await
        .expect("Create should succeed");

    let fetched = repo.get_by_id(created.id).await.expect("Get should succeed");
    assert_eq!(fetched, created);

    let missing = repo.get_by_id(MISSING_TASK_ID).await;
    assert!(
        missing.as_ref().is_err_and(|e| e.is_not_found()),
        "Missing ID should be not found, got {missing:?}"
    );
}

/// Test completion toggling through update
pub async fn test_update_contract<R: TaskRepository>(repo: &R) {
    let mut task = repo
        .create(NewTask::new("Pay rent"))
        .await
        .expect("Create should succeed");

    task.set_complete(true);
    repo.update(&task).await.expect("Update should succeed");
    assert!(repo.get_by_id(task.id).await.expect("Get should succeed").complete);

    task.set_complete(false);
    repo.update(&task).await.expect("Update should succeed");
    assert!(!repo.get_by_id(task.id).await.expect("Get should succeed").complete);

    let mut ghost = task.clone();
    ghost.id = MISSING_TASK_ID;
    let result = repo.update(&ghost).await;
    assert!(
        result.as_ref().is_err_and(|e| e.is_not_found()),
        "Updating a missing ID should be not found, got {result:?}"
    );
}

/// Test that listing returns every created task exactly once
pub async fn test_list_contract<R: TaskRepository>(repo: &R) {
    let created = repo
        .create(NewTask::new("Listed"))
        .await
        .expect("Create should succeed");

    let tasks = repo.list().await.expect("List should succeed");
    assert_contains_task_id(&tasks, created.id);
    assert_unique_ids(&tasks);
}

/// Test health check contract
pub async fn test_health_check_contract<R: TaskRepository>(repo: &R) {
    repo.health_check()
        .await
        .expect("Health check should pass for healthy repository");
}
