//! Origin site notification port.
//!
//! One call is one delivery attempt. Retrying is the caller's concern.

use async_trait::async_trait;
use thiserror::Error;

/// Why a delivery attempt did not count as delivered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("Notify request failed: {0}")]
    Request(String),

    #[error("Notify endpoint returned status {0}")]
    Status(u16),

    #[error("Notify endpoint answered code {0}")]
    Rejected(i64),

    #[error("Notify response invalid: {0}")]
    InvalidResponse(String),
}

/// Port for pinging the origin site's notify URL.
#[async_trait]
pub trait OrderNotifier: Send + Sync {
    /// Make a single delivery attempt.
    ///
    /// Delivered means HTTP 200 with a JSON body whose `code` is 0.
    async fn notify(&self, notify_url: &str) -> Result<(), NotifyError>;
}
