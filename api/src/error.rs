//! Unified error types for the devfeed API
//!
//! This module defines error types for each layer:
//! - `FetchError`: upstream fetch failures (transport + HTTP status)
//! - `AppError`: Application layer errors (wraps fetch errors for HTTP responses)

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Upstream fetch errors
///
/// Any of these aborts the pipeline it occurred in, and the aggregation
/// that pipeline belongs to.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx response. `body` is the parsed error body when it was JSON,
    /// the raw text as a JSON string otherwise, `null` when empty.
    #[error("HTTP {status} {status_text}: {body}")]
    Http {
        status: u16,
        status_text: String,
        body: serde_json::Value,
    },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

impl FetchError {
    /// Upstream HTTP status, if the failure came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            FetchError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Upstream error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Fetch(e) => {
                tracing::error!("Upstream error: {}", e);
                match e {
                    FetchError::Http {
                        status,
                        status_text,
                        ..
                    } => {
                        let http_status = match *status {
                            404 => StatusCode::NOT_FOUND,
                            403 | 429 => StatusCode::TOO_MANY_REQUESTS,
                            _ => StatusCode::BAD_GATEWAY,
                        };
                        (
                            http_status,
                            "Upstream service error",
                            Some(format!("{} {}", status, status_text)),
                        )
                    }
                    FetchError::Timeout(_) => (
                        StatusCode::GATEWAY_TIMEOUT,
                        "Upstream service timed out",
                        None,
                    ),
                    FetchError::Request(_) | FetchError::Decode(_) => {
                        (StatusCode::BAD_GATEWAY, "Upstream service error", None)
                    }
                }
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_error(status: u16) -> AppError {
        AppError::Fetch(FetchError::Http {
            status,
            status_text: "Whatever".to_string(),
            body: serde_json::Value::Null,
        })
    }

    #[test]
    fn upstream_not_found_maps_to_404() {
        let response = http_error(404).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn upstream_rate_limit_maps_to_429() {
        assert_eq!(
            http_error(403).into_response().status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            http_error(429).into_response().status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn other_upstream_status_maps_to_bad_gateway() {
        assert_eq!(
            http_error(500).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn timeout_maps_to_gateway_timeout() {
        let response =
            AppError::Fetch(FetchError::Timeout(Duration::from_secs(30))).into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn fetch_error_exposes_status() {
        let err = FetchError::Http {
            status: 404,
            status_text: "Not Found".to_string(),
            body: serde_json::json!({"message": "Not Found"}),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(FetchError::Decode("bad".to_string()).status(), None);
    }
}
