//! Task Core Library
//!
//! This crate provides the domain model, error types, and the store trait
//! for the task tracking backend. All other crates depend on the types and
//! interfaces defined here.
//!
//! # Architecture
//!
//! - [`models`] - The `Task` record and the `NewTask` insert payload
//! - [`error`] - Error types and result handling
//! - [`repository`] - Repository trait for data persistence
//! - [`protocol`] - Per-endpoint request payloads and the health report
//!
//! # Example
//!
//! ```rust
//! use task_core::{decode_payload, CreateTaskRequest};
//!
//! let request: CreateTaskRequest = decode_payload(br#"{"name": "Buy milk"}"#).unwrap();
//! let new_task = request.into_new_task();
//! assert_eq!(new_task.name, "Buy milk");
//! ```

pub mod error;
pub mod models;
pub mod protocol;
pub mod repository;

// Re-export commonly used types at the crate root for convenience
pub use error::{Result, TaskError};
pub use models::{NewTask, Task};
pub use protocol::{decode_payload, CreateTaskRequest, HealthStatus, MarkCompleteRequest};
pub use repository::TaskRepository;

/// Version reported by the health endpoint
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_re_exports() {
        let task = Task::new(1, "Test".to_string(), false);
        assert_eq!(task.completion_label(), "incomplete");

        let error = TaskError::not_found_id(1);
        assert!(error.is_not_found());
    }
}
