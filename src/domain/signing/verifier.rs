//! Site request signature verification.
//!
//! Implements the site's request signing scheme using HMAC-SHA256 over
//! `signing_content + ":" + timestamp`, encoded as URL-safe base64 with padding.
//!
//! The timestamp is an expiry bound, not an issue time: a request is accepted
//! while `now <= timestamp`. Signers set it to a near-future instant.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::canonical::CanonicalRequest;
use super::errors::SignatureError;

type HmacSha256 = Hmac<Sha256>;

/// Verifier for signed site requests.
pub struct RequestVerifier {
    /// Communication key shared with the site.
    secret: SecretString,
}

impl RequestVerifier {
    /// Creates a new verifier with the given shared secret.
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Verifies a request against the current wall clock.
    ///
    /// # Errors
    ///
    /// - `InvalidTimestamp` - Timestamp is not a plain unsigned integer
    /// - `TimestampExpired` - Current time is past the timestamp
    /// - `InvalidSignature` - Signature does not match
    pub fn verify(
        &self,
        request: &CanonicalRequest<'_>,
        signature: &str,
        timestamp: &str,
    ) -> Result<(), SignatureError> {
        self.verify_at(request, signature, timestamp, chrono::Utc::now().timestamp())
    }

    /// Verifies a request as of `now` (seconds since the epoch).
    pub fn verify_at(
        &self,
        request: &CanonicalRequest<'_>,
        signature: &str,
        timestamp: &str,
        now: i64,
    ) -> Result<(), SignatureError> {
        let expires_at = parse_expiry(timestamp).map_err(|e| {
            tracing::warn!(timestamp, "Rejected request with malformed timestamp");
            e
        })?;

        if now > expires_at {
            tracing::warn!(now, expires_at, "Rejected request past its signed expiry");
            return Err(SignatureError::TimestampExpired);
        }

        let expected = self.sign(request, timestamp);
        if !constant_time_compare(expected.as_bytes(), signature.as_bytes()) {
            tracing::warn!(
                path = request.canonical_path(),
                "Rejected request with invalid signature"
            );
            return Err(SignatureError::InvalidSignature);
        }

        Ok(())
    }

    /// Computes the signature for a request and timestamp.
    ///
    /// The timestamp is signed exactly as given, without re-formatting.
    pub fn sign(&self, request: &CanonicalRequest<'_>, timestamp: &str) -> String {
        let signed = format!("{}:{}", request.signing_content(), timestamp);

        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key");
        mac.update(signed.as_bytes());
        URL_SAFE.encode(mac.finalize().into_bytes())
    }
}

/// Parses a timestamp consisting only of ASCII digits.
///
/// Signs, whitespace, empty input and values beyond `i64` are rejected.
pub fn parse_expiry(timestamp: &str) -> Result<i64, SignatureError> {
    if timestamp.is_empty() {
        return Err(SignatureError::InvalidTimestamp);
    }
    timestamp.bytes().try_fold(0i64, |acc, b| {
        if !b.is_ascii_digit() {
            return Err(SignatureError::InvalidTimestamp);
        }
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(b - b'0')))
            .ok_or(SignatureError::InvalidTimestamp)
    })
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
