//! No-op notifier for disabled webhook delivery.

use super::service::{WebhookNotifier, WebhookResult};
use crate::domain::result::TrackingResult;
use async_trait::async_trait;
use tracing::debug;

/// A notifier that drops every result.
///
/// Used when webhook delivery is switched off, and in tests where delivery
/// must not leave the process.
pub struct NullNotifier;

impl NullNotifier {
    pub fn new() -> Self {
        debug!("Using NullNotifier (webhook delivery disabled)");
        Self
    }
}

impl Default for NullNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebhookNotifier for NullNotifier {
    async fn notify(&self, _webhook_url: &str, _result: &TrackingResult) -> WebhookResult<()> {
        Ok(())
    }
}
