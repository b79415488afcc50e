//! Webhook delivery for tracking results.
//!
//! Provides a [`WebhookNotifier`] trait with two implementations:
//! - [`HttpWebhookNotifier`] - JSON POST via `ureq`
//! - [`NullNotifier`] - No-op implementation for disabled delivery

mod http_notifier;
mod null_notifier;
mod service;

pub use http_notifier::HttpWebhookNotifier;
pub use null_notifier::NullNotifier;
pub use service::{WebhookBody, WebhookError, WebhookNotifier, WebhookResult};

#[cfg(test)]
pub use service::MockWebhookNotifier;
