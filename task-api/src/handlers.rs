//! Route handlers for the task endpoints
//!
//! Bodies are read as raw bytes and decoded as JSON regardless of the declared
//! content type. Success bodies for the write endpoints are plain text.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use task_core::{
    decode_payload, CreateTaskRequest, HealthStatus, MarkCompleteRequest, Task, TaskRepository,
};
use tracing::{debug, info, warn};

use crate::error::ApiError;

/// State shared by every handler
#[derive(Debug)]
pub struct ApiState<R> {
    pub repository: Arc<R>,
}

pub type SharedState<R> = Arc<ApiState<R>>;

/// `GET /tasks`
pub async fn list_tasks<R: TaskRepository + 'static>(
    State(state): State<SharedState<R>>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state
        .repository
        .list()
        .await
        .map_err(|e| ApiError::from_task_error("Error fetching tasks", e))?;

    debug!(count = tasks.len(), "Listed tasks");
    Ok(Json(tasks))
}

/// `PUT /tasks/create`
pub async fn create_task<R: TaskRepository + 'static>(
    State(state): State<SharedState<R>>,
    body: Bytes,
) -> Result<String, ApiError> {
    let request: CreateTaskRequest = decode_payload(&body)
        .map_err(|e| ApiError::from_task_error("Error decoding task", e))?;

    let task = state
        .repository
        .create(request.into_new_task())
        .await
        .map_err(|e| ApiError::from_task_error("Error creating task", e))?;

    info!(task_id = task.id, name = %task.name, "Task created");
    Ok(format!("Task created with ID: {}", task.id))
}

/// `POST /tasks/mark-complete`
///
/// Reads the task first so a missing id answers 404 before any write.
pub async fn mark_complete<R: TaskRepository + 'static>(
    State(state): State<SharedState<R>>,
    body: Bytes,
) -> Result<String, ApiError> {
    let request: MarkCompleteRequest = decode_payload(&body)
        .map_err(|e| ApiError::from_task_error("Error decoding request", e))?;

    let mut task = state
        .repository
        .get_by_id(request.id)
        .await
        .map_err(|e| ApiError::from_task_error("Error fetching task", e))?;

    task.set_complete(request.completed);

    state
        .repository
        .update(&task)
        .await
        .map_err(|e| ApiError::from_task_error("Error marking task as complete", e))?;

    info!(task_id = task.id, complete = task.complete, "Task completion updated");
    Ok(format!(
        "Task with ID {} marked as {}",
        task.id,
        task.completion_label()
    ))
}

/// `GET /health`
pub async fn health<R: TaskRepository + 'static>(
    State(state): State<SharedState<R>>,
) -> (StatusCode, Json<HealthStatus>) {
    match state.repository.health_check().await {
        Ok(()) => (StatusCode::OK, Json(HealthStatus::healthy())),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus::unhealthy()),
            )
        }
    }
}

/// Any method other than the one a route accepts
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Any path outside the route table
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}
