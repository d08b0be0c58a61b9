//! HTTP API for the family task tracker
//!
//! This crate exposes a [`TaskRepository`](task_core::TaskRepository) over three
//! endpoints consumed by a browser front end:
//!
//! - `GET /tasks` returns every task as a JSON array
//! - `PUT /tasks/create` inserts a task from `{"name": ...}`
//! - `POST /tasks/mark-complete` sets completion from `{"id": ..., "completed": ...}`
//!
//! plus `GET /health`. Every response carries permissive cross-origin headers
//! and every `OPTIONS` request is answered with an empty 200.
//!
//! # Usage
//!
//! ```no_run
//! use mocks::MockTaskRepository;
//! use std::{sync::Arc, time::Duration};
//! use task_api::TaskServer;
//!
//! # async fn run() -> Result<(), task_api::ServerError> {
//! let server = TaskServer::new(Arc::new(MockTaskRepository::new()), "http://localhost:5173")?;
//! let running = server.start("127.0.0.1:8080").await?;
//! running.stop(Duration::from_secs(5)).await?;
//! # Ok(())
//! # }
//! ```

pub mod cors;
pub mod error;
pub mod handlers;
pub mod request_logger;
pub mod server;

pub use cors::{CorsPolicy, DEFAULT_ALLOWED_ORIGIN};
pub use error::{ApiError, ServerError};
pub use server::{RunningServer, TaskServer};
