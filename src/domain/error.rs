//! Error taxonomy for building, encoding and decoding tracking URLs.

/// Errors returned by the tracking codec.
///
/// Every failure is surfaced to the caller; nothing is logged and swallowed
/// inside the codec. Callers decide whether a stale or tampered URL is a
/// silent no-op or an application error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackingError {
    /// The caller violated the payload contract (e.g. click tracking without
    /// a destination URL).
    #[error("Invalid tracking payload: {0}")]
    InvalidPayload(String),

    /// The path segment is not valid URL-safe base64.
    #[error("Invalid tracking token encoding: {0}")]
    Decode(String),

    /// Authenticated decryption failed: wrong key, tampered, truncated or
    /// expired token.
    #[error("Tracking token decryption failed: {0}")]
    Decryption(&'static str),

    /// The decoded bytes are not a valid tracking payload.
    #[error("Malformed tracking payload: {0}")]
    MalformedPayload(String),

    /// The full URL does not start with the expected base tracking URL.
    #[error("URL '{url}' does not start with base tracking URL '{base}'")]
    InvalidUrl { url: String, base: String },

    /// No base tracking URL is configured for the requested tracking kind.
    #[error("No base {0} tracking URL configured")]
    MissingBaseUrl(&'static str),

    /// The encryption key text is not a valid Fernet key.
    #[error("Invalid encryption key: {0}")]
    InvalidKey(String),
}

impl TrackingError {
    /// Returns `true` when the token itself could not be turned back into a
    /// payload (as opposed to a caller or configuration error).
    pub fn is_bad_token(&self) -> bool {
        matches!(
            self,
            Self::Decode(_) | Self::Decryption(_) | Self::MalformedPayload(_)
        )
    }
}

impl From<base64::DecodeError> for TrackingError {
    fn from(e: base64::DecodeError) -> Self {
        Self::Decode(e.to_string())
    }
}

impl From<serde_json::Error> for TrackingError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedPayload(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_token_classification() {
        assert!(TrackingError::Decode("x".into()).is_bad_token());
        assert!(TrackingError::Decryption("signature mismatch").is_bad_token());
        assert!(TrackingError::MalformedPayload("x".into()).is_bad_token());

        assert!(!TrackingError::InvalidPayload("x".into()).is_bad_token());
        assert!(!TrackingError::MissingBaseUrl("open").is_bad_token());
        assert!(
            !TrackingError::InvalidUrl {
                url: "a".into(),
                base: "b".into()
            }
            .is_bad_token()
        );
    }

    #[test]
    fn test_invalid_url_message() {
        let err = TrackingError::InvalidUrl {
            url: "https://other.com/x".into(),
            base: "https://a.b.com/".into(),
        };

        let message = err.to_string();
        assert!(message.contains("https://other.com/x"));
        assert!(message.contains("https://a.b.com/"));
    }

    #[test]
    fn test_from_serde_error_is_malformed() {
        let err: TrackingError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();

        assert!(matches!(err, TrackingError::MalformedPayload(_)));
    }
}
