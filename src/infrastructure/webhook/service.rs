//! Webhook notifier trait, error types and wire format.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::payload::Metadata;
use crate::domain::result::{RequestData, TrackingResult};

/// Errors that can occur while notifying a webhook.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("Webhook request failed: {0}")]
    Request(String),

    #[error("Webhook responded with status {0}")]
    Status(u16),

    #[error("Failed to serialize webhook body: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for webhook operations.
pub type WebhookResult<T> = Result<T, WebhookError>;

/// JSON body POSTed to webhooks.
#[derive(Debug, Serialize)]
pub struct WebhookBody<'a> {
    pub tracked_url: Option<&'a str>,
    pub webhook_url: Option<&'a str>,
    pub metadata: &'a Metadata,
    pub request_data: Option<&'a RequestData>,
    pub is_open_tracking: bool,
    pub is_click_tracking: bool,
}

impl<'a> From<&'a TrackingResult> for WebhookBody<'a> {
    fn from(result: &'a TrackingResult) -> Self {
        Self {
            tracked_url: result.tracked_url.as_deref(),
            webhook_url: result.webhook_url.as_deref(),
            metadata: &result.metadata,
            request_data: result.request_data.as_ref(),
            is_open_tracking: result.is_open_tracking(),
            is_click_tracking: result.is_click_tracking(),
        }
    }
}

/// Delivers tracking results to webhooks.
///
/// # Implementations
///
/// - [`crate::infrastructure::webhook::HttpWebhookNotifier`] - JSON POST over HTTP
/// - [`crate::infrastructure::webhook::NullNotifier`] - No-op for disabled delivery
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebhookNotifier: Send + Sync {
    /// Sends one tracking result to `webhook_url`.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError`] on transport failures or non-success status.
    /// Callers decide whether to retry.
    async fn notify(&self, webhook_url: &str, result: &TrackingResult) -> WebhookResult<()>;
}
