//! Signature verification errors.

use thiserror::Error;

/// Reasons a signed site request is rejected.
///
/// The display strings are returned verbatim to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// Timestamp is not a plain base-10 integer.
    #[error("invalid timestamp")]
    InvalidTimestamp,

    /// Current time is past the claimed expiry.
    #[error("timestamp verification failed")]
    TimestampExpired,

    /// Computed signature differs from the claimed one.
    #[error("invalid signature")]
    InvalidSignature,
}
