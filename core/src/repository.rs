use async_trait::async_trait;
use crate::{
    error::Result,
    models::{NewTask, Task},
};

/// Repository trait for task persistence and retrieval operations
///
/// This trait defines the interface for all task data operations.
/// Implementations must be thread-safe and support concurrent access.
/// Dropping a returned future cancels the underlying database call.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Get a task by its numeric ID
    ///
    /// # Returns
    /// * `Ok(Task)` - The task if found
    /// * `Err(TaskError::NotFound)` - If no task exists with that ID
    /// * `Err(TaskError::Database)` - If the query or row mapping fails
    async fn get_by_id(&self, id: u64) -> Result<Task>;

    /// List every task in the order the database returns them
    ///
    /// # Returns
    /// * `Ok(Vec<Task>)` - All tasks (may be empty)
    /// * `Err(TaskError::Database)` - If the query or row mapping fails
    async fn list(&self) -> Result<Vec<Task>>;

    /// Insert a new task inside its own transaction
    ///
    /// # Returns
    /// * `Ok(Task)` - The stored task with its database-assigned ID
    /// * `Err(TaskError::Transaction)` - If the transaction cannot start or commit
    /// * `Err(TaskError::Database)` - If the insert fails (rolled back)
    async fn create(&self, task: NewTask) -> Result<Task>;

    /// Persist `name` and `complete` for the row matching `task.id`
    ///
    /// # Returns
    /// * `Ok(())` - The row was updated and committed
    /// * `Err(TaskError::NotFound)` - If no row matches (rolled back)
    /// * `Err(TaskError::Transaction)` - If the transaction cannot start or commit
    /// * `Err(TaskError::Database)` - If the update fails (rolled back)
    async fn update(&self, task: &Task) -> Result<()>;

    /// Get repository health status for monitoring
    ///
    /// # Returns
    /// * `Ok(())` - Repository is healthy and connected
    /// * `Err(TaskError::Connection)` - Repository is unreachable
    async fn health_check(&self) -> Result<()>;
}
