//! Error handling for the HTTP surface
//!
//! Maps store errors to status codes with plain-text bodies.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use task_core::TaskError;
use thiserror::Error;
use tracing::error;

/// Errors returned to HTTP clients
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid request method")]
    MethodNotAllowed,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Convert to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Wrap a store error, prefixing the text with what was being attempted
    pub fn from_task_error(context: &str, err: TaskError) -> Self {
        match err {
            TaskError::NotFound(_) => ApiError::NotFound("Task not found".to_string()),
            TaskError::Validation(msg) => ApiError::BadRequest(format!("{context}: {msg}")),
            other => ApiError::Internal(format!("{context}: {other}")),
        }
    }
}

/// Convert from TaskError to ApiError
impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(msg) => ApiError::NotFound(msg),
            TaskError::Validation(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        (status, self.to_string()).into_response()
    }
}

/// Errors starting or stopping the listener
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("Invalid allowed origin '{0}'")]
    InvalidOrigin(String),

    #[error("Failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("Graceful shutdown did not finish within {0:?}")]
    ShutdownTimeout(Duration),

    #[error("Server task failed: {0}")]
    Join(String),
}
