//! HTTP error type and its JSON envelope.
//!
//! Every error renders as:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "...", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::error::TrackingError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Internal { message, .. } => f.write_str(message),
        }
    }
}

/// Undecodable tokens are reported as missing links; configuration problems
/// are internal errors and never echo key material.
impl From<TrackingError> for AppError {
    fn from(e: TrackingError) -> Self {
        match e {
            e if e.is_bad_token() => {
                AppError::not_found("Tracking link not found", json!({ "reason": e.to_string() }))
            }
            TrackingError::InvalidPayload(reason) => {
                AppError::bad_request("Invalid tracking payload", json!({ "reason": reason }))
            }
            TrackingError::InvalidUrl { url, base } => AppError::bad_request(
                "URL does not match the tracking base URL",
                json!({ "url": url, "base": base }),
            ),
            TrackingError::MissingBaseUrl(kind) => AppError::internal(
                "Tracking service is misconfigured",
                json!({ "missing": format!("base {} tracking URL", kind) }),
            ),
            _ => AppError::internal("Tracking service is misconfigured", json!({})),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}
