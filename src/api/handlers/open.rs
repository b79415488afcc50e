//! Handler for the open tracking pixel.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, HeaderValue, header},
    response::IntoResponse,
};
use tracing::warn;

use crate::application::tracking::open_tracking_pixel;
use crate::state::AppState;
use crate::utils::request_data::extract_request_data;

const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// Serves the tracking pixel and records the open.
///
/// # Endpoint
///
/// `GET /open/{token}`
///
/// # Request Flow
///
/// 1. Extract user agent and client IP
/// 2. Decode the token into a tracking result
/// 3. Queue a webhook event when the result has a webhook URL
/// 4. Return the 1×1 PNG
///
/// The pixel is returned even when the token is invalid, so a broken or
/// expired link never shows up as a broken image in a mail client.
pub async fn open_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> impl IntoResponse {
    let request_data = extract_request_data(&headers, addr, state.behind_proxy);

    if let Err(e) = state.tracking_service.record_open(&token, request_data) {
        warn!("Ignoring invalid open tracking token: {}", e);
    }

    let (pixel, mime_type) = open_tracking_pixel();

    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(mime_type)),
            (header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE)),
        ],
        pixel,
    )
}
