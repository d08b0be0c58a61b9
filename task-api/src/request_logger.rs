//! Structured request logging middleware for the HTTP server
//!
//! Emits one event per request with method, path, status and timing.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// Request logging middleware
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let duration = start_time.elapsed();
    let status = response.status();

    if status.is_server_error() {
        warn!(
            %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = duration.as_millis(),
            "Request failed"
        );
    } else {
        info!(
            %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = duration.as_millis(),
            "Request handled"
        );
    }

    response
}
