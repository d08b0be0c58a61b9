//! Mock implementation of TaskRepository trait
//!
//! Provides a thread-safe mock repository with:
//! - Error injection capabilities
//! - Call tracking for verification
//! - Auto-increment IDs like the real table

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use task_core::{NewTask, Result, Task, TaskError, TaskRepository};

/// Mock implementation of TaskRepository for testing
pub struct MockTaskRepository {
    tasks: Arc<Mutex<BTreeMap<u64, Task>>>,
    next_id: Arc<AtomicU64>,
    error_injection: Arc<Mutex<Option<TaskError>>>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl Default for MockTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTaskRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::with_next_id(1)
    }

    /// Create mock repository with pre-populated tasks
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let max_id = tasks.iter().map(|task| task.id).max().unwrap_or(0);
        let repo = Self::with_next_id(max_id + 1);
        {
            let mut stored = repo.tasks.lock();
            for task in tasks {
                stored.insert(task.id, task);
            }
        }
        repo
    }

    /// Create mock repository with specific starting ID
    pub fn with_next_id(next_id: u64) -> Self {
        Self {
            tasks: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(AtomicU64::new(next_id)),
            error_injection: Arc::new(Mutex::new(None)),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Inject error for next operation
    pub fn inject_error(&self, error: TaskError) {
        *self.error_injection.lock() = Some(error);
    }

    /// Clear error injection
    pub fn clear_error(&self) {
        *self.error_injection.lock() = None;
    }

    /// Get history of called methods
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().clone()
    }

    /// Clear call history
    pub fn clear_history(&self) {
        self.call_history.lock().clear();
    }

    /// Snapshot of a stored task, bypassing call tracking and error injection
    pub fn stored(&self, id: u64) -> Option<Task> {
        self.tasks.lock().get(&id).cloned()
    }

    /// Number of stored tasks
    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }

    /// Assert method was called
    pub fn assert_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            history.iter().any(|call| call.contains(method)),
            "Method '{}' was not called. Call history: {:?}",
            method,
            *history
        );
    }

    /// Assert method was never called
    pub fn assert_not_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            !history.iter().any(|call| call.starts_with(method)),
            "Method '{}' was called. Call history: {:?}",
            method,
            *history
        );
    }

    /// Check if an error should be injected, consuming it if so
    fn check_error_injection(&self) -> Result<()> {
        let mut error_opt = self.error_injection.lock();
        if let Some(error) = error_opt.take() {
            return Err(error);
        }
        Ok(())
    }

    /// Record method call in history
    fn record_call(&self, method: &str) {
        self.call_history.lock().push(format!("{method}()"));
    }

    /// Record method call with parameters in history
    fn record_call_with_params(&self, method: &str, params: &str) {
        self.call_history.lock().push(format!("{method}({params})"));
    }
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
    async fn get_by_id(&self, id: u64) -> Result<Task> {
        self.record_call_with_params("get_by_id", &format!("id={id}"));
        self.check_error_injection()?;

        self.tasks
            .lock()
            .get(&id)
            .cloned()
            .ok_or_else(|| TaskError::not_found_id(id))
    }

    async fn list(&self) -> Result<Vec<Task>> {
        self.record_call("list");
        self.check_error_injection()?;

        Ok(self.tasks.lock().values().cloned().collect())
    }

    async fn create(&self, task: NewTask) -> Result<Task> {
        self.record_call_with_params("create", &format!("name={}", task.name));
        self.check_error_injection()?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = task.into_task(id);
        self.tasks.lock().insert(id, created.clone());

        Ok(created)
    }

    async fn update(&self, task: &Task) -> Result<()> {
        self.record_call_with_params(
            "update",
            &format!("id={}, complete={}", task.id, task.complete),
        );
        self.check_error_injection()?;

        let mut tasks = self.tasks.lock();
        let stored = tasks
            .get_mut(&task.id)
            .ok_or_else(|| TaskError::not_found_id(task.id))?;
        stored.name = task.name.clone();
        stored.complete = task.complete;

        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        self.record_call("health_check");
        self.check_error_injection()
    }
}
