//! Canonical tracking payload and its builder.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::configuration::Configuration;
use crate::domain::error::TrackingError;

/// Arbitrary JSON metadata attached to a tracking URL.
pub type Metadata = Map<String, Value>;

/// What a tracking URL records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingKind<'a> {
    /// The recipient opened the message (pixel request).
    Open,
    /// The recipient followed a link to the given destination.
    Click(&'a str),
}

impl TrackingKind<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Click(_) => "click",
        }
    }
}

/// The record serialized into a tracking token.
///
/// The presence of `url` is the only discriminator: with it the payload is
/// click tracking, without it open tracking. Absent fields are omitted from
/// the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl TrackingPayload {
    /// Assembles the payload for one tracking URL.
    ///
    /// - The webhook URL is embedded only with `include_webhook_url`.
    /// - With `include_default_metadata`, call-level `metadata` is applied on
    ///   top of a copy of the default metadata (shallow, call-level keys win);
    ///   otherwise only call-level metadata is carried.
    /// - Metadata is omitted when empty unless defaults are embedded.
    /// - Click destinations are stored verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::InvalidPayload`] for a click with an empty
    /// destination URL.
    pub fn build(
        kind: TrackingKind<'_>,
        metadata: &Metadata,
        config: &Configuration,
    ) -> Result<Self, TrackingError> {
        let url = match kind {
            TrackingKind::Open => None,
            TrackingKind::Click(url) if url.is_empty() => {
                return Err(TrackingError::InvalidPayload(
                    "click tracking requires a destination URL".to_string(),
                ));
            }
            TrackingKind::Click(url) => Some(url.to_string()),
        };

        let webhook_url = if config.include_webhook_url {
            config.webhook_url.clone()
        } else {
            None
        };

        let metadata = if config.include_default_metadata {
            Some(merge_metadata(&config.default_metadata, metadata))
        } else if metadata.is_empty() {
            None
        } else {
            Some(metadata.clone())
        };

        Ok(Self {
            url,
            webhook_url,
            metadata,
        })
    }

    /// Like [`TrackingPayload::build`] for callers holding an optional
    /// destination, as in untyped entry points.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::InvalidPayload`] when `is_click` is set and
    /// `url` is missing or empty, or when an open payload is given a URL.
    pub fn build_from_parts(
        is_click: bool,
        url: Option<&str>,
        metadata: &Metadata,
        config: &Configuration,
    ) -> Result<Self, TrackingError> {
        let kind = match (is_click, url) {
            (true, Some(url)) => TrackingKind::Click(url),
            (true, None) => {
                return Err(TrackingError::InvalidPayload(
                    "click tracking requires a destination URL".to_string(),
                ));
            }
            (false, None) => TrackingKind::Open,
            (false, Some(_)) => {
                return Err(TrackingError::InvalidPayload(
                    "open tracking must not carry a destination URL".to_string(),
                ));
            }
        };

        Self::build(kind, metadata, config)
    }

    pub fn is_click_tracking(&self) -> bool {
        self.url.is_some()
    }
}

/// Shallow merge: keys of `overrides` replace those of `base` wholesale.
pub fn merge_metadata(base: &Metadata, overrides: &Metadata) -> Metadata {
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
