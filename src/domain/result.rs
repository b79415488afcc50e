//! Decoded tracking results and the decode-side merge rules.

use serde::{Deserialize, Serialize};

use crate::domain::configuration::Configuration;
use crate::domain::payload::{Metadata, TrackingPayload, merge_metadata};

/// Information about the request that hit a tracking URL.
///
/// Supplied by the caller at decode time and passed through untouched.
/// `extra` carries any additional caller-defined fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestData {
    pub user_agent: Option<String>,
    pub user_ip: Option<String>,
    #[serde(flatten)]
    pub extra: Metadata,
}

impl RequestData {
    pub fn new(user_agent: Option<String>, user_ip: Option<String>) -> Self {
        Self {
            user_agent,
            user_ip,
            extra: Metadata::new(),
        }
    }
}

/// The outcome of decoding a tracking URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingResult {
    /// Destination URL; present only for click tracking.
    pub tracked_url: Option<String>,
    pub webhook_url: Option<String>,
    /// Merged metadata, possibly empty.
    pub metadata: Metadata,
    pub request_data: Option<RequestData>,
}

impl TrackingResult {
    /// Merges a decoded payload with the decode-time configuration.
    ///
    /// - The embedded webhook URL wins; otherwise the configured one is used.
    /// - Unless `include_default_metadata` says the defaults were embedded,
    ///   `default_metadata` is layered beneath the decoded metadata.
    pub fn from_payload(
        payload: TrackingPayload,
        request_data: Option<RequestData>,
        config: &Configuration,
    ) -> Self {
        let webhook_url = payload.webhook_url.or_else(|| config.webhook_url.clone());

        let decoded = payload.metadata.unwrap_or_default();
        let metadata = if config.include_default_metadata || config.default_metadata.is_empty() {
            decoded
        } else {
            merge_metadata(&config.default_metadata, &decoded)
        };

        Self {
            tracked_url: payload.url,
            webhook_url,
            metadata,
            request_data,
        }
    }

    pub fn is_click_tracking(&self) -> bool {
        self.tracked_url.is_some()
    }

    pub fn is_open_tracking(&self) -> bool {
        !self.is_click_tracking()
    }
}
