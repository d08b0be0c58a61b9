//! Cross-origin headers for the browser front end.
//!
//! Every response carries the same three headers, and any `OPTIONS` request is
//! answered directly with an empty 200 so preflights never reach a handler.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ServerError;

/// Origin of the local development front end
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// The fixed set of cross-origin headers applied to every response
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allow_origin: HeaderValue,
}

impl CorsPolicy {
    pub fn new(allowed_origin: &str) -> Result<Self, ServerError> {
        let allow_origin = HeaderValue::from_str(allowed_origin)
            .map_err(|_| ServerError::InvalidOrigin(allowed_origin.to_string()))?;
        Ok(Self { allow_origin })
    }

    pub fn allowed_origin(&self) -> &HeaderValue {
        &self.allow_origin
    }

    fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            self.allow_origin.clone(),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        );
    }
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            allow_origin: HeaderValue::from_static(DEFAULT_ALLOWED_ORIGIN),
        }
    }
}

/// Middleware answering preflights and stamping cross-origin headers
pub async fn cors_middleware(
    State(policy): State<CorsPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    policy.apply(response.headers_mut());
    response
}
