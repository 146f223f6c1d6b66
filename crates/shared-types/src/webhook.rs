//! # Webhook Signature Verification
//!
//! The single, authoritative implementation of payment-webhook authenticity
//! checks. The gateway MUST verify a delivery with [`verify_signature`]
//! before trusting anything inside the payload.
//!
//! ## Scheme
//!
//! The provider signs the raw request body with a shared secret and sends
//! the result in the `Carebid-Signature` header:
//!
//! ```text
//! Carebid-Signature: t=1717171717,v1=5257a869e7...
//! ```
//!
//! where `v1` is hex-encoded `HMAC-SHA256(secret, "{t}.{raw_body}")`.
//! Binding the timestamp into the MAC bounds how long a captured delivery
//! can be replayed.
//!
//! ## Security Properties
//!
//! - **HMAC-SHA256 signatures** over the exact raw bytes received
//! - **Time-bounded validity**: deliveries outside the tolerance window are
//!   rejected even with a valid MAC
//! - **Constant-time comparison** of the received tag

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// HTTP header carrying the signature.
pub const SIGNATURE_HEADER: &str = "carebid-signature";

/// Default allowed age for a delivery (seconds).
pub const DEFAULT_TOLERANCE_SECS: u64 = 300;

/// Maximum allowed clock skew for future timestamps (seconds).
pub const MAX_FUTURE_SKEW: u64 = 10;

/// Why a delivery failed verification.
///
/// All variants are hard rejections: the payload must not be parsed, and no
/// state change may happen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// Header missing the `t=`/`v1=` parts or carrying non-hex data.
    #[error("malformed signature header")]
    MalformedHeader,

    /// Signed timestamp outside the tolerance window.
    #[error("signature timestamp out of range: {timestamp} vs now {now}")]
    TimestampOutOfRange { timestamp: u64, now: u64 },

    /// MAC did not match the payload.
    #[error("invalid signature")]
    InvalidSignature,
}

/// Signs a payload, producing the full header value.
///
/// Used by tests and by the checkout simulator; the real provider computes
/// the same construction on its side.
pub fn sign_payload(secret: &[u8], timestamp: u64, payload: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    let tag = mac.finalize().into_bytes();
    format!("t={},v1={}", timestamp, hex::encode(tag))
}

/// Verifies a delivery's signature header against the raw body.
///
/// # Arguments
///
/// - `secret`: the shared webhook secret
/// - `header`: the `Carebid-Signature` header value
/// - `payload`: the raw request body, byte-for-byte as received
/// - `now`: current Unix timestamp (see [`current_timestamp`])
/// - `tolerance_secs`: how old a signed timestamp may be
///
/// Checks run in order: header shape, timestamp window, MAC. The MAC check
/// uses `Mac::verify_slice`, which compares in constant time.
pub fn verify_signature(
    secret: &[u8],
    header: &str,
    payload: &[u8],
    now: u64,
    tolerance_secs: u64,
) -> Result<(), SignatureError> {
    let (timestamp, tag) = parse_header(header)?;

    if timestamp.saturating_add(tolerance_secs) < now {
        return Err(SignatureError::TimestampOutOfRange { timestamp, now });
    }
    if timestamp > now.saturating_add(MAX_FUTURE_SKEW) {
        return Err(SignatureError::TimestampOutOfRange { timestamp, now });
    }

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|_| SignatureError::InvalidSignature)?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac.verify_slice(&tag)
        .map_err(|_| SignatureError::InvalidSignature)
}

/// Returns the current Unix timestamp.
///
/// Never panics: a clock before UNIX_EPOCH yields 0.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn parse_header(header: &str) -> Result<(u64, Vec<u8>), SignatureError> {
    let mut timestamp = None;
    let mut tag = None;

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => {
                timestamp = Some(value.parse().map_err(|_| SignatureError::MalformedHeader)?);
            }
            Some(("v1", value)) => {
                tag = Some(hex::decode(value).map_err(|_| SignatureError::MalformedHeader)?);
            }
            // Unknown parts are tolerated so the scheme can evolve.
            _ => {}
        }
    }

    match (timestamp, tag) {
        (Some(timestamp), Some(tag)) => Ok((timestamp, tag)),
        _ => Err(SignatureError::MalformedHeader),
    }
}
