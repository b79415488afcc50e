//! Encoding tracking payloads into URL-safe tokens and back.
//!
//! # Encode
//!
//! 1. Serialize the payload to ASCII JSON ([`json`])
//! 2. Seal it as a Fernet token when a key is configured ([`fernet`])
//! 3. URL-safe base64 with padding
//!
//! # Decode
//!
//! The exact reverse, failing with a distinct [`TrackingError`] per stage:
//! [`TrackingError::Decode`], [`TrackingError::Decryption`] and
//! [`TrackingError::MalformedPayload`].
//!
//! Randomness and time are explicit parameters of the `_with` functions so
//! tests can pin them; the plain variants use the thread-local CSPRNG and the
//! system clock.

pub mod fernet;
pub mod json;
pub mod url;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;
use chrono::{DateTime, Utc};
use rand::{CryptoRng, RngCore};
use serde_json::Value;
use tracing::trace;

use crate::domain::configuration::Configuration;
use crate::domain::error::TrackingError;
use crate::domain::payload::TrackingPayload;

/// Encodes a payload into a URL-safe token.
///
/// # Errors
///
/// Returns [`TrackingError::InvalidPayload`] if the payload cannot be
/// serialized.
pub fn encode_payload(
    payload: &TrackingPayload,
    config: &Configuration,
) -> Result<String, TrackingError> {
    encode_payload_with(payload, config, &mut rand::rng(), Utc::now())
}

/// Encodes a payload with an explicit randomness source and clock.
///
/// # Errors
///
/// Returns [`TrackingError::InvalidPayload`] if the payload cannot be
/// serialized.
pub fn encode_payload_with<R: RngCore + CryptoRng + ?Sized>(
    payload: &TrackingPayload,
    config: &Configuration,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<String, TrackingError> {
    let plaintext =
        json::to_vec(payload).map_err(|e| TrackingError::InvalidPayload(e.to_string()))?;

    let bytes = match &config.encryption_key {
        Some(key) => fernet::seal(key, &plaintext, now, rng),
        None => plaintext,
    };

    trace!(
        encrypted = config.is_encrypted(),
        len = bytes.len(),
        "Encoded tracking payload"
    );

    Ok(URL_SAFE.encode(bytes))
}

/// Decodes a URL-safe token into a payload.
///
/// # Errors
///
/// - [`TrackingError::Decode`] for invalid base64
/// - [`TrackingError::Decryption`] for tokens failing authentication
/// - [`TrackingError::MalformedPayload`] for bytes that are not a payload
pub fn decode_payload(
    token: &str,
    config: &Configuration,
) -> Result<TrackingPayload, TrackingError> {
    decode_payload_at(token, config, Utc::now())
}

/// Decodes a token, checking token age against `now`.
///
/// # Errors
///
/// See [`decode_payload`].
pub fn decode_payload_at(
    token: &str,
    config: &Configuration,
    now: DateTime<Utc>,
) -> Result<TrackingPayload, TrackingError> {
    let bytes = URL_SAFE.decode(token)?;

    let plaintext = match &config.encryption_key {
        Some(key) => fernet::open(key, &bytes, now, config.token_ttl)?,
        None => bytes,
    };

    let value: Value = serde_json::from_slice(&plaintext)?;
    if !value.is_object() {
        return Err(TrackingError::MalformedPayload(
            "payload must be a JSON object".to_string(),
        ));
    }

    Ok(serde_json::from_value(value)?)
}
