//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::TrackingService;

#[derive(Clone)]
pub struct AppState {
    pub tracking_service: Arc<TrackingService>,
    /// When true, the client IP is read from `X-Real-IP` / `X-Forwarded-For`.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(tracking_service: Arc<TrackingService>, behind_proxy: bool) -> Self {
        Self {
            tracking_service,
            behind_proxy,
        }
    }
}
