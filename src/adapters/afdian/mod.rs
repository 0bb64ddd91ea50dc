//! Afdian payment provider adapter.
//!
//! - `client` - Checkout links and the signed order query API
//! - `types` - Query API shapes and the payment callback payload

mod client;
mod types;

pub use client::AfdianClient;
pub use types::{CallbackAck, CallbackPayload};
