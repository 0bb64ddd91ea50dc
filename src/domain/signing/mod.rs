//! Signed site request domain module.
//!
//! Authenticates requests from the origin storage site with a shared
//! communication key.
//!
//! # Module Structure
//!
//! - `canonical` - Method-dependent signing content
//! - `verifier` - HMAC-SHA256 verification with expiry-style timestamps
//! - `errors` - Rejection reasons

mod canonical;
mod errors;
mod verifier;

pub use canonical::{
    canonical_header_key, escape_html_sensitive, CanonicalRequest, RequestStyle,
    SIGNED_HEADER_PREFIX,
};
pub use errors::SignatureError;
pub use verifier::{parse_expiry, RequestVerifier};
