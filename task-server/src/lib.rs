//! Task Server Library
//!
//! Configuration loading, logging setup, and application wiring for the
//! `tasks-server` binary.

pub mod config;
pub mod setup;
pub mod telemetry;

pub use config::Config;
pub use setup::{create_repository, create_server, ensure_database_directory, initialize_app, App};
pub use telemetry::init_telemetry;
