use thiserror::Error;

/// Result type alias for task operations
pub type Result<T> = std::result::Result<T, TaskError>;

/// Error types for the task tracking backend.
///
/// These errors cover every failure mode of the store and the connector
/// beneath it. Each variant maps to an HTTP status code for API responses.
///
/// # Examples
///
/// ```rust
/// use task_core::error::TaskError;
///
/// let not_found = TaskError::not_found_id(42);
///
/// assert!(not_found.is_not_found());
/// assert_eq!(not_found.status_code(), 404);
/// assert_eq!(TaskError::Database("disk I/O".into()).status_code(), 500);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Task not found by the given identifier
    #[error("Task not found: {0}")]
    NotFound(String),

    /// Request payload could not be decoded into the expected shape
    #[error("Validation error: {0}")]
    Validation(String),

    /// Pool could not be opened or the liveness check failed
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query or statement execution failed
    #[error("Database error: {0}")]
    Database(String),

    /// Transaction could not be started or committed
    #[error("Transaction error: {0}")]
    Transaction(String),
}

impl TaskError {
    /// Create a not found error for a task ID
    pub fn not_found_id(id: u64) -> Self {
        Self::NotFound(format!("Task with ID {id} not found"))
    }

    /// Check if this error indicates a not found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, TaskError::NotFound(_))
    }

    /// Check if this error indicates a decoding problem
    pub fn is_validation(&self) -> bool {
        matches!(self, TaskError::Validation(_))
    }

    /// Check if this error came from the database layer
    pub fn is_database(&self) -> bool {
        matches!(
            self,
            TaskError::Database(_) | TaskError::Connection(_) | TaskError::Transaction(_)
        )
    }

    /// Convert to appropriate HTTP status code equivalent
    pub fn status_code(&self) -> u16 {
        match self {
            TaskError::NotFound(_) => 404,
            TaskError::Validation(_) => 400,
            TaskError::Connection(_) => 500,
            TaskError::Database(_) => 500,
            TaskError::Transaction(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = TaskError::not_found_id(42);
        assert_eq!(
            error,
            TaskError::NotFound("Task with ID 42 not found".to_string())
        );
        assert!(error.is_not_found());
        assert_eq!(error.status_code(), 404);

        let error = TaskError::Validation("expected value at line 1 column 1".to_string());
        assert!(error.is_validation());
        assert_eq!(error.status_code(), 400);
    }

    #[test]
    fn test_error_display() {
        let error = TaskError::not_found_id(7);
        assert_eq!(format!("{error}"), "Task not found: Task with ID 7 not found");

        let error = TaskError::Transaction("cannot commit".to_string());
        assert_eq!(format!("{error}"), "Transaction error: cannot commit");

        let error = TaskError::Connection("refused".to_string());
        assert_eq!(format!("{error}"), "Connection error: refused");
    }

    #[test]
    fn test_error_predicates() {
        assert!(TaskError::NotFound("test".to_string()).is_not_found());
        assert!(!TaskError::Validation("test".to_string()).is_not_found());

        assert!(TaskError::Validation("test".to_string()).is_validation());
        assert!(!TaskError::Database("test".to_string()).is_validation());

        assert!(TaskError::Database("test".to_string()).is_database());
        assert!(TaskError::Connection("test".to_string()).is_database());
        assert!(TaskError::Transaction("test".to_string()).is_database());
        assert!(!TaskError::NotFound("test".to_string()).is_database());
    }

    #[test]
    fn test_server_side_errors_map_to_500() {
        for error in [
            TaskError::Connection("x".into()),
            TaskError::Database("x".into()),
            TaskError::Transaction("x".into()),
        ] {
            assert_eq!(error.status_code(), 500, "{error:?}");
        }
    }
}
