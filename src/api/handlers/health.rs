//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: The webhook event queue is closed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "event_queue": { "status": "ok", "message": "Capacity: 10000" },
///     "encryption": { "status": "ok", "message": "enabled" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let queue_check = check_event_queue(&state);
    let encryption_check = check_encryption(&state);

    let all_healthy = queue_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            event_queue: queue_check,
            encryption: encryption_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks that the webhook worker is still draining the event queue.
fn check_event_queue(state: &AppState) -> CheckStatus {
    let service = &state.tracking_service;

    if service.is_queue_open() {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Capacity: {}", service.queue_capacity())),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Event queue is closed".to_string()),
        }
    }
}

/// Reports whether tokens are encrypted. Informational only.
fn check_encryption(state: &AppState) -> CheckStatus {
    let enabled = state.tracking_service.config().is_encrypted();

    CheckStatus {
        status: "ok".to_string(),
        message: Some(if enabled { "enabled" } else { "disabled" }.to_string()),
    }
}
