//! Public encode/decode contracts for open and click tracking URLs.
//!
//! Every function takes the [`Configuration`] explicitly. A typical round
//! trip:
//!
//! ```
//! use url_tracker::application::tracking;
//! use url_tracker::domain::{Configuration, Metadata};
//!
//! let config = Configuration::new()
//!     .with_base_click_tracking_url("https://t.example.com/click/");
//!
//! let url = tracking::click_tracking_url("https://example.com/offer", &Metadata::new(), &config)
//!     .unwrap();
//! let path = tracking::click_tracking_url_path(&url, &config).unwrap();
//! let result = tracking::click_tracking_result(&path, None, &config).unwrap();
//!
//! assert_eq!(result.tracked_url.as_deref(), Some("https://example.com/offer"));
//! assert!(result.is_click_tracking());
//! ```

use chrono::{DateTime, Utc};
use rand::{CryptoRng, RngCore};

use crate::codec::url::{bare_tracking_path, extract_tracking_path, join_tracking_url};
use crate::codec::{decode_payload_at, encode_payload_with};
use crate::domain::configuration::Configuration;
use crate::domain::error::TrackingError;
use crate::domain::payload::{Metadata, TrackingKind, TrackingPayload};
use crate::domain::pixel;
use crate::domain::result::{RequestData, TrackingResult};

/// Returns the open tracking URL for `metadata`.
///
/// # Errors
///
/// Returns [`TrackingError::MissingBaseUrl`] without a base open tracking URL.
pub fn open_tracking_url(
    metadata: &Metadata,
    config: &Configuration,
) -> Result<String, TrackingError> {
    tracking_url_with(
        TrackingKind::Open,
        metadata,
        config,
        &mut rand::rng(),
        Utc::now(),
    )
}

/// Returns the click tracking URL redirecting to `url_to_track`.
///
/// # Errors
///
/// Returns [`TrackingError::InvalidPayload`] for an empty destination and
/// [`TrackingError::MissingBaseUrl`] without a base click tracking URL.
pub fn click_tracking_url(
    url_to_track: &str,
    metadata: &Metadata,
    config: &Configuration,
) -> Result<String, TrackingError> {
    tracking_url_with(
        TrackingKind::Click(url_to_track),
        metadata,
        config,
        &mut rand::rng(),
        Utc::now(),
    )
}

/// Returns only the encoded path segment for a tracking URL.
///
/// Useful when the caller assembles URLs itself.
///
/// # Errors
///
/// See [`tracking_url_with`].
pub fn tracking_url_path(
    kind: TrackingKind<'_>,
    metadata: &Metadata,
    config: &Configuration,
) -> Result<String, TrackingError> {
    let payload = TrackingPayload::build(kind, metadata, config)?;
    encode_payload_with(&payload, config, &mut rand::rng(), Utc::now())
}

/// Builds a full tracking URL with an explicit randomness source and clock.
///
/// # Errors
///
/// - [`TrackingError::InvalidPayload`] if the payload contract is violated
/// - [`TrackingError::MissingBaseUrl`] if no base URL is configured for `kind`
pub fn tracking_url_with<R: RngCore + CryptoRng + ?Sized>(
    kind: TrackingKind<'_>,
    metadata: &Metadata,
    config: &Configuration,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<String, TrackingError> {
    let base_url = match kind {
        TrackingKind::Open => open_base_url(config)?,
        TrackingKind::Click(_) => click_base_url(config)?,
    };
    let payload = TrackingPayload::build(kind, metadata, config)?;
    let token = encode_payload_with(&payload, config, rng, now)?;

    Ok(join_tracking_url(base_url, &token, config.append_slash))
}

/// Extracts the encoded path from a full open tracking URL.
///
/// # Errors
///
/// Returns [`TrackingError::InvalidUrl`] if the URL does not start with the
/// base open tracking URL.
pub fn open_tracking_url_path(
    full_url: &str,
    config: &Configuration,
) -> Result<String, TrackingError> {
    let base_url = open_base_url(config)?;
    extract_tracking_path(full_url, base_url, config.append_slash)
}

/// Extracts the encoded path from a full click tracking URL.
///
/// # Errors
///
/// Returns [`TrackingError::InvalidUrl`] if the URL does not start with the
/// base click tracking URL.
pub fn click_tracking_url_path(
    full_url: &str,
    config: &Configuration,
) -> Result<String, TrackingError> {
    let base_url = click_base_url(config)?;
    extract_tracking_path(full_url, base_url, config.append_slash)
}

/// Decodes an open tracking path.
///
/// # Errors
///
/// Returns the codec errors of [`tracking_result_at`].
pub fn open_tracking_result(
    encoded_path: &str,
    request_data: Option<RequestData>,
    config: &Configuration,
) -> Result<TrackingResult, TrackingError> {
    tracking_result_at(encoded_path, request_data, config, Utc::now())
}

/// Decodes a click tracking path.
///
/// The result kind follows the payload shape: a path that carries no
/// destination decodes as open tracking.
///
/// # Errors
///
/// Returns the codec errors of [`tracking_result_at`].
pub fn click_tracking_result(
    encoded_path: &str,
    request_data: Option<RequestData>,
    config: &Configuration,
) -> Result<TrackingResult, TrackingError> {
    tracking_result_at(encoded_path, request_data, config, Utc::now())
}

/// Decodes a bare path or a path with framework leftovers (leading `/`,
/// trailing `/` with `append_slash`) at time `now`.
///
/// # Errors
///
/// - [`TrackingError::Decode`] for invalid base64
/// - [`TrackingError::Decryption`] when authenticated decryption fails
/// - [`TrackingError::MalformedPayload`] when the bytes are not a payload
pub fn tracking_result_at(
    encoded_path: &str,
    request_data: Option<RequestData>,
    config: &Configuration,
    now: DateTime<Utc>,
) -> Result<TrackingResult, TrackingError> {
    let token = bare_tracking_path(encoded_path, config.append_slash);
    let payload = decode_payload_at(token, config, now)?;

    Ok(TrackingResult::from_payload(payload, request_data, config))
}

/// Returns the tracking pixel bytes and MIME type.
pub fn open_tracking_pixel() -> (&'static [u8], &'static str) {
    pixel::open_tracking_pixel()
}

fn open_base_url(config: &Configuration) -> Result<&str, TrackingError> {
    config
        .base_open_tracking_url
        .as_deref()
        .ok_or(TrackingError::MissingBaseUrl("open"))
}

fn click_base_url(config: &Configuration) -> Result<&str, TrackingError> {
    config
        .base_click_tracking_url
        .as_deref()
        .ok_or(TrackingError::MissingBaseUrl("click"))
}
