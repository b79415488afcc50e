//! Handler for click tracking redirects.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Path, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_data::extract_request_data;

/// Redirects a click tracking token to its destination URL.
///
/// # Endpoint
///
/// `GET /click/{token}`
///
/// # Request Flow
///
/// 1. Extract user agent and client IP
/// 2. Decode the token; it must carry a destination URL
/// 3. Queue a webhook event when the result has a webhook URL
/// 4. Return 307 Temporary Redirect
///
/// # Errors
///
/// Returns 404 Not Found if the token is invalid, expired, or an open
/// tracking token.
pub async fn click_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let request_data = extract_request_data(&headers, addr, state.behind_proxy);

    let target = state
        .tracking_service
        .record_click(&token, request_data)
        .inspect_err(|e| debug!("Rejected click tracking token: {}", e))?;

    Ok(Redirect::temporary(&target))
}
