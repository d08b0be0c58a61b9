//! Mock implementations and test utilities for the task tracking backend
//!
//! This crate provides testing infrastructure including:
//! - An in-memory TaskRepository with error injection
//! - Builders and fixtures for tasks and request payloads
//! - Custom assertion helpers
//! - Contract test helpers shared by every TaskRepository implementation

pub mod assertions;
pub mod builders;
pub mod contracts;
pub mod fixtures;
pub mod repository;

pub use assertions::*;
pub use builders::*;
pub use contracts::*;
pub use fixtures::*;
pub use repository::MockTaskRepository;
