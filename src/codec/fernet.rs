//! Fernet authenticated encryption for tracking tokens.
//!
//! Token layout (all integers big-endian):
//!
//! ```text
//! 0x80 | timestamp (8) | IV (16) | AES-128-CBC ciphertext (n * 16) | HMAC-SHA256 (32)
//! ```
//!
//! The HMAC covers every byte before it and is keyed with the first half of the
//! 32-byte key; the second half is the AES key. The URL-safe base64 form of a
//! sealed token is a standard Fernet token, so tokens interoperate with other
//! Fernet implementations sharing the key.

use aes::Aes128;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use rand::{CryptoRng, RngCore};
use sha2::Sha256;
use std::fmt;
use std::time::Duration;

use crate::domain::error::TrackingError;

type HmacSha256 = Hmac<Sha256>;
type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

const VERSION: u8 = 0x80;
const KEY_LEN: usize = 32;
const HALF_KEY_LEN: usize = 16;
const TIMESTAMP_LEN: usize = 8;
const IV_LEN: usize = 16;
const BLOCK_LEN: usize = 16;
const MAC_LEN: usize = 32;
const HEADER_LEN: usize = 1 + TIMESTAMP_LEN + IV_LEN;

/// Smallest well-formed token: header, one cipher block and the MAC.
pub const MIN_TOKEN_LEN: usize = HEADER_LEN + BLOCK_LEN + MAC_LEN;

/// Tokens stamped further than this in the future are rejected.
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Symmetric key material for sealing tracking tokens.
///
/// Stored as the two 16-byte halves of a Fernet key. The textual form is the
/// 44-character URL-safe base64 encoding of all 32 bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptionKey {
    signing: [u8; HALF_KEY_LEN],
    encryption: [u8; HALF_KEY_LEN],
}

impl EncryptionKey {
    /// Parses a URL-safe base64 Fernet key.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::InvalidKey`] if the text is not valid base64
    /// or does not decode to exactly 32 bytes.
    pub fn from_base64(key: &str) -> Result<Self, TrackingError> {
        let bytes = URL_SAFE
            .decode(key.trim())
            .map_err(|e| TrackingError::InvalidKey(format!("base64 decode: {}", e)))?;

        Self::from_bytes(&bytes)
    }

    /// Builds a key from 32 raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::InvalidKey`] if `bytes` is not 32 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TrackingError> {
        if bytes.len() != KEY_LEN {
            return Err(TrackingError::InvalidKey(format!(
                "key must be {} bytes, got {}",
                KEY_LEN,
                bytes.len()
            )));
        }

        let mut signing = [0u8; HALF_KEY_LEN];
        let mut encryption = [0u8; HALF_KEY_LEN];
        signing.copy_from_slice(&bytes[..HALF_KEY_LEN]);
        encryption.copy_from_slice(&bytes[HALF_KEY_LEN..]);

        Ok(Self {
            signing,
            encryption,
        })
    }

    /// Generates a fresh random key.
    pub fn generate<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rng.fill_bytes(&mut bytes);

        let mut signing = [0u8; HALF_KEY_LEN];
        let mut encryption = [0u8; HALF_KEY_LEN];
        signing.copy_from_slice(&bytes[..HALF_KEY_LEN]);
        encryption.copy_from_slice(&bytes[HALF_KEY_LEN..]);

        Self {
            signing,
            encryption,
        }
    }

    /// Returns the URL-safe base64 text form of the key.
    pub fn to_base64(&self) -> String {
        let mut bytes = [0u8; KEY_LEN];
        bytes[..HALF_KEY_LEN].copy_from_slice(&self.signing);
        bytes[HALF_KEY_LEN..].copy_from_slice(&self.encryption);
        URL_SAFE.encode(bytes)
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.signing).expect("HMAC accepts any key length")
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionKey(***)")
    }
}

/// Encrypts and authenticates `plaintext` into a binary Fernet token.
///
/// A fresh IV is drawn from `rng` and `now` is stamped into the token, so two
/// seals of the same plaintext never produce the same bytes.
pub fn seal<R: RngCore + CryptoRng + ?Sized>(
    key: &EncryptionKey,
    plaintext: &[u8],
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<u8> {
    let mut iv = [0u8; IV_LEN];
    rng.fill_bytes(&mut iv);

    let ciphertext = Aes128CbcEnc::new(&key.encryption.into(), &iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut token = Vec::with_capacity(HEADER_LEN + ciphertext.len() + MAC_LEN);
    token.push(VERSION);
    token.extend_from_slice(&now.timestamp().to_be_bytes());
    token.extend_from_slice(&iv);
    token.extend_from_slice(&ciphertext);

    let mut mac = key.mac();
    mac.update(&token);
    token.extend_from_slice(&mac.finalize().into_bytes());

    token
}

/// Verifies and decrypts a binary Fernet token.
///
/// # Errors
///
/// Returns [`TrackingError::Decryption`] if the token is truncated, carries an
/// unknown version, fails HMAC verification (wrong key or tampering), is older
/// than `ttl`, is stamped too far in the future, or has invalid padding.
pub fn open(
    key: &EncryptionKey,
    token: &[u8],
    now: DateTime<Utc>,
    ttl: Option<Duration>,
) -> Result<Vec<u8>, TrackingError> {
    if token.len() < MIN_TOKEN_LEN {
        return Err(TrackingError::Decryption("token too short"));
    }

    if token[0] != VERSION {
        return Err(TrackingError::Decryption("unknown token version"));
    }

    let (signed, signature) = token.split_at(token.len() - MAC_LEN);

    let mut mac = key.mac();
    mac.update(signed);
    mac.verify_slice(signature)
        .map_err(|_| TrackingError::Decryption("signature mismatch"))?;

    let mut stamp = [0u8; TIMESTAMP_LEN];
    stamp.copy_from_slice(&signed[1..1 + TIMESTAMP_LEN]);
    let issued_at = i64::from_be_bytes(stamp);
    let now = now.timestamp();

    if issued_at > now.saturating_add(MAX_CLOCK_SKEW_SECS) {
        return Err(TrackingError::Decryption("token timestamp is in the future"));
    }

    if let Some(ttl) = ttl {
        let ttl = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        if issued_at.saturating_add(ttl) < now {
            return Err(TrackingError::Decryption("token expired"));
        }
    }

    let mut iv = [0u8; IV_LEN];
    iv.copy_from_slice(&signed[1 + TIMESTAMP_LEN..HEADER_LEN]);
    let ciphertext = &signed[HEADER_LEN..];

    if ciphertext.len() % BLOCK_LEN != 0 {
        return Err(TrackingError::Decryption("ciphertext is not block aligned"));
    }

    Aes128CbcDec::new(&key.encryption.into(), &iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| TrackingError::Decryption("invalid padding"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const TEST_KEY: &str = "XdhWbQZnqCIPLBL0ViPIW2vBTsmUNxAS-7mOtTdu6ZM=";

    fn key() -> EncryptionKey {
        EncryptionKey::from_base64(TEST_KEY).unwrap()
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_key_round_trips_through_base64() {
        assert_eq!(key().to_base64(), TEST_KEY);
    }

    #[test]
    fn test_key_rejects_wrong_length() {
        let result = EncryptionKey::from_base64("c2hvcnQ=");
        assert!(matches!(result, Err(TrackingError::InvalidKey(_))));
    }

    #[test]
    fn test_key_rejects_invalid_base64() {
        let result = EncryptionKey::from_base64("not a key!");
        assert!(matches!(result, Err(TrackingError::InvalidKey(_))));
    }

    #[test]
    fn test_key_debug_hides_material() {
        let debug = format!("{:?}", key());
        assert_eq!(debug, "EncryptionKey(***)");
    }

    #[test]
    fn test_generated_keys_differ() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = EncryptionKey::generate(&mut rng);
        let b = EncryptionKey::generate(&mut rng);

        assert_ne!(a, b);
        assert_eq!(a.to_base64().len(), 44);
    }

    #[test]
    fn test_seal_open_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        let token = seal(&key(), b"{\"a\": 1}", at(1_700_000_000), &mut rng);

        let plaintext = open(&key(), &token, at(1_700_000_010), None).unwrap();
        assert_eq!(plaintext, b"{\"a\": 1}");
    }

    #[test]
    fn test_seal_layout() {
        let mut rng = StdRng::seed_from_u64(7);
        let token = seal(&key(), b"{}", at(1_700_000_000), &mut rng);

        assert_eq!(token[0], 0x80);
        assert_eq!(&token[1..9], &1_700_000_000i64.to_be_bytes());
        assert_eq!(token.len(), MIN_TOKEN_LEN);
    }

    #[test]
    fn test_seal_is_randomized() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = seal(&key(), b"{}", at(1_700_000_000), &mut rng);
        let b = seal(&key(), b"{}", at(1_700_000_000), &mut rng);

        assert_ne!(a, b);
    }

    #[test]
    fn test_open_with_wrong_key_fails() {
        let mut rng = StdRng::seed_from_u64(7);
        let token = seal(&key(), b"{}", at(1_700_000_000), &mut rng);
        let other = EncryptionKey::generate(&mut rng);

        let result = open(&other, &token, at(1_700_000_000), None);
        assert_eq!(result, Err(TrackingError::Decryption("signature mismatch")));
    }

    #[test]
    fn test_open_detects_every_flipped_byte() {
        let mut rng = StdRng::seed_from_u64(7);
        let token = seal(&key(), b"{\"k\": \"v\"}", at(1_700_000_000), &mut rng);

        for i in 0..token.len() {
            let mut tampered = token.clone();
            tampered[i] ^= 0x01;

            let result = open(&key(), &tampered, at(1_700_000_000), None);
            assert!(
                matches!(result, Err(TrackingError::Decryption(_))),
                "flipping byte {} was not detected",
                i
            );
        }
    }

    #[test]
    fn test_open_rejects_truncated_token() {
        let mut rng = StdRng::seed_from_u64(7);
        let token = seal(&key(), b"{}", at(1_700_000_000), &mut rng);

        let result = open(&key(), &token[..token.len() - 1], at(1_700_000_000), None);
        assert_eq!(result, Err(TrackingError::Decryption("token too short")));
    }

    #[test]
    fn test_open_enforces_ttl() {
        let mut rng = StdRng::seed_from_u64(7);
        let token = seal(&key(), b"{}", at(1_700_000_000), &mut rng);
        let ttl = Some(Duration::from_secs(60));

        assert!(open(&key(), &token, at(1_700_000_060), ttl).is_ok());
        assert_eq!(
            open(&key(), &token, at(1_700_000_061), ttl),
            Err(TrackingError::Decryption("token expired"))
        );
    }

    #[test]
    fn test_open_rejects_future_timestamp() {
        let mut rng = StdRng::seed_from_u64(7);
        let token = seal(&key(), b"{}", at(1_700_000_000), &mut rng);

        assert!(open(&key(), &token, at(1_700_000_000 - 60), None).is_ok());
        assert_eq!(
            open(&key(), &token, at(1_700_000_000 - 61), None),
            Err(TrackingError::Decryption("token timestamp is in the future"))
        );
    }
}
