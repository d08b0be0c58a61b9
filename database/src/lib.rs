//! Database crate for the task tracking backend
//!
//! This crate provides the SQLite connector and the SQLite implementation of
//! the TaskRepository trait.
//!
//! # Features
//!
//! - Connection pooling with a liveness check at open
//! - Reads outside any transaction, one transaction per write
//! - Embedded schema migration for the `tasks` table
//! - Error mapping from sqlx into `TaskError`
//!
//! # Usage
//!
//! ```rust
//! use database::{DatabaseSettings, SqliteTaskRepository};
//! use task_core::repository::TaskRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // In-memory database for illustration
//!     let repo = SqliteTaskRepository::connect(&DatabaseSettings::new("sqlite::memory:")).await?;
//!
//!     // Run migrations
//!     repo.migrate().await?;
//!
//!     // Repository is ready to use
//!     repo.health_check().await?;
//!     assert!(repo.list().await?.is_empty());
//!
//!     Ok(())
//! }
//! ```

mod common;
mod connector;
mod sqlite;

pub use connector::{Database, DatabaseSettings, SqliteQuery};
pub use sqlite::SqliteTaskRepository;

// Re-export commonly used types from task-core for convenience
pub use task_core::{
    error::{Result, TaskError},
    models::{NewTask, Task},
    repository::TaskRepository,
};
