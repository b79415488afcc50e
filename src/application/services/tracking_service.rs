//! Tracking hit handling for the HTTP service.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::application::tracking;
use crate::domain::configuration::Configuration;
use crate::domain::result::{RequestData, TrackingResult};
use crate::domain::tracking_event::TrackingEvent;
use crate::error::AppError;

/// Decodes tracking tokens and hands results to the webhook worker.
///
/// Webhook delivery is fire-and-forget: events go to a bounded channel and
/// are dropped with a warning when the queue is full, so a slow webhook never
/// delays a redirect or a pixel response.
///
/// A webhook URL carried by the token is followed only when the configuration
/// embeds webhook URLs in encrypted tokens. Otherwise events go to the
/// configured webhook, or nowhere.
pub struct TrackingService {
    config: Arc<Configuration>,
    event_sender: mpsc::Sender<TrackingEvent>,
}

impl TrackingService {
    pub fn new(config: Arc<Configuration>, event_sender: mpsc::Sender<TrackingEvent>) -> Self {
        Self {
            config,
            event_sender,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Records an open tracking hit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the token cannot be decoded.
    pub fn record_open(
        &self,
        token: &str,
        request_data: RequestData,
    ) -> Result<TrackingResult, AppError> {
        let result = tracking::open_tracking_result(token, Some(request_data), &self.config)?;

        self.dispatch(&result);
        Ok(result)
    }

    /// Records a click tracking hit and returns the URL to redirect to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the token cannot be decoded or
    /// carries no destination URL.
    pub fn record_click(&self, token: &str, request_data: RequestData) -> Result<String, AppError> {
        let result = tracking::click_tracking_result(token, Some(request_data), &self.config)?;

        let Some(tracked_url) = result.tracked_url.clone() else {
            return Err(AppError::not_found(
                "Tracking link not found",
                json!({ "reason": "token does not carry a destination URL" }),
            ));
        };

        self.dispatch(&result);
        Ok(tracked_url)
    }

    /// Returns `false` once the webhook worker has stopped.
    pub fn is_queue_open(&self) -> bool {
        !self.event_sender.is_closed()
    }

    /// Remaining event queue capacity.
    pub fn queue_capacity(&self) -> usize {
        self.event_sender.capacity()
    }

    /// Webhook URL an event for `result` is delivered to.
    fn webhook_target(&self, result: &TrackingResult) -> Option<String> {
        if self.config.include_webhook_url && self.config.is_encrypted() {
            result.webhook_url.clone()
        } else {
            self.config.webhook_url.clone()
        }
    }

    fn dispatch(&self, result: &TrackingResult) {
        let Some(webhook_url) = self.webhook_target(result) else {
            debug!("No webhook configured for tracking hit");
            return;
        };

        let mut result = result.clone();
        result.webhook_url = Some(webhook_url.clone());
        let event = TrackingEvent::new(webhook_url, result);

        match self.event_sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!("Event queue full, dropping event for {}", event.webhook_url)
            }
            Err(TrySendError::Closed(_)) => warn!("Event queue closed, webhook worker stopped"),
        }
    }
}
