//! Tracking event model for asynchronous webhook delivery.

use crate::domain::result::TrackingResult;

/// A decoded tracking hit waiting to be forwarded to its webhook.
///
/// Created by HTTP handlers and sent over a bounded channel to
/// [`crate::domain::webhook_worker::run_webhook_worker`], so that redirects and
/// pixel responses never wait on webhook delivery.
#[derive(Debug, Clone)]
pub struct TrackingEvent {
    pub webhook_url: String,
    pub result: TrackingResult,
}

impl TrackingEvent {
    pub fn new(webhook_url: impl Into<String>, result: TrackingResult) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            result,
        }
    }
}
