//! Tracking configuration shared by encode and decode calls.

use std::time::Duration;

use crate::codec::fernet::EncryptionKey;
use crate::domain::payload::Metadata;

/// Immutable bundle of tracking defaults.
///
/// There is no process-wide default: every encode and decode call receives a
/// `&Configuration` explicitly. Per-call overrides are made by cloning and
/// chaining `with_*` methods.
///
/// The embedding flags must agree between encode and decode: at decode time
/// they declare what the token already carries, and whatever it does not
/// carry is supplied from this configuration instead.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use url_tracker::domain::Configuration;
///
/// let config = Configuration::new()
///     .with_base_open_tracking_url("https://t.example.com/open/")
///     .with_webhook_url("https://hooks.example.com/tracking/")
///     .with_default_metadata(json!({"campaign": "spring"}).as_object().unwrap().clone());
///
/// assert!(config.encryption_key.is_none());
/// assert!(!config.include_default_metadata);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    pub base_open_tracking_url: Option<String>,
    pub base_click_tracking_url: Option<String>,
    pub webhook_url: Option<String>,
    /// Base metadata layer; call-level metadata overrides it key by key.
    pub default_metadata: Metadata,
    /// Presence switches the codec into encrypted mode.
    pub encryption_key: Option<EncryptionKey>,
    /// Embed `webhook_url` in tokens instead of supplying it at decode time.
    pub include_webhook_url: bool,
    /// Embed `default_metadata` in tokens instead of layering it at decode time.
    pub include_default_metadata: bool,
    /// Append `/` to generated URLs.
    pub append_slash: bool,
    /// Maximum accepted age of an encrypted token.
    pub token_ttl: Option<Duration>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_open_tracking_url(mut self, url: impl Into<String>) -> Self {
        self.base_open_tracking_url = Some(url.into());
        self
    }

    pub fn with_base_click_tracking_url(mut self, url: impl Into<String>) -> Self {
        self.base_click_tracking_url = Some(url.into());
        self
    }

    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    pub fn with_default_metadata(mut self, metadata: Metadata) -> Self {
        self.default_metadata = metadata;
        self
    }

    pub fn with_encryption_key(mut self, key: EncryptionKey) -> Self {
        self.encryption_key = Some(key);
        self
    }

    pub fn with_include_webhook_url(mut self, include: bool) -> Self {
        self.include_webhook_url = include;
        self
    }

    pub fn with_include_default_metadata(mut self, include: bool) -> Self {
        self.include_default_metadata = include;
        self
    }

    pub fn with_append_slash(mut self, append: bool) -> Self {
        self.append_slash = append;
        self
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = Some(ttl);
        self
    }

    /// Returns whether tokens are sealed with Fernet.
    pub fn is_encrypted(&self) -> bool {
        self.encryption_key.is_some()
    }
}
