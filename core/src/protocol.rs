//! Request and response payloads exchanged over the HTTP surface.
//!
//! Each endpoint decodes into its own struct so a malformed body fails at
//! decode time instead of deep inside a handler.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TaskError},
    models::NewTask,
};

/// Body of `PUT /tasks/create`.
///
/// Extra fields (a client echoing `id` or `complete`) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub name: String,
}

impl CreateTaskRequest {
    pub fn into_new_task(self) -> NewTask {
        NewTask::new(self.name)
    }
}

/// Body of `POST /tasks/mark-complete`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkCompleteRequest {
    pub id: u64,
    /// Target completion state; omitted means "complete"
    #[serde(default = "default_completed")]
    pub completed: bool,
}

fn default_completed() -> bool {
    true
}

/// Health report returned by `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub database: bool,
    pub version: String,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "ok".to_string(),
            database: true,
            version: crate::VERSION.to_string(),
        }
    }

    pub fn unhealthy() -> Self {
        Self {
            status: "unavailable".to_string(),
            database: false,
            version: crate::VERSION.to_string(),
        }
    }
}

/// Decode a JSON request body into an endpoint payload
pub fn decode_payload<T>(body: &[u8]) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_slice(body).map_err(|e| TaskError::Validation(e.to_string()))
}
