//! Domain layer: tracking configuration, payloads, results and events.
//!
//! Nothing in this layer performs I/O except the webhook worker, which only
//! talks to the [`crate::infrastructure::webhook::WebhookNotifier`] trait.
//!
//! # Architecture
//!
//! - [`configuration`] - Immutable tracking defaults
//! - [`payload`] - Canonical record embedded in tracking URLs
//! - [`result`] - Decoded results and decode-side merge rules
//! - [`pixel`] - The 1×1 open tracking pixel
//! - [`error`] - Error taxonomy of the codec
//! - [`tracking_event`] - Tracking hit queued for webhook delivery
//! - [`webhook_worker`] - Asynchronous webhook delivery worker
//!
//! # Tracking Flow
//!
//! 1. HTTP handler decodes the token into a [`result::TrackingResult`]
//! 2. A [`tracking_event::TrackingEvent`] is sent to an async channel
//! 3. [`webhook_worker::run_webhook_worker`] delivers it with retries

pub mod configuration;
pub mod error;
pub mod payload;
pub mod pixel;
pub mod result;
pub mod tracking_event;
pub mod webhook_worker;

pub use configuration::Configuration;
pub use error::TrackingError;
pub use payload::{Metadata, TrackingKind, TrackingPayload};
pub use result::{RequestData, TrackingResult};
