//! Payment provider port.
//!
//! Defines the contract for the donation platform that collects payment:
//! building the checkout link an order redirects to, and confirming a
//! settlement through the provider's own query API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for the payment provider.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Build the checkout URL for an order.
    ///
    /// `amount` is the CNY major amount with two fractional digits.
    fn checkout_url(&self, order_no: &str, amount: &str) -> String;

    /// Query the provider for a settled trade.
    ///
    /// Returns `None` when the provider has no settlement for the trade yet;
    /// that is a normal outcome, not an error.
    async fn query_settlement(&self, out_trade_no: &str)
        -> Result<Option<Settlement>, PaymentError>;
}

/// A settlement as reported by the provider's query API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Provider trade number the query was keyed by.
    pub out_trade_no: String,
    /// Origin order identifier, carried in the provider's remark field.
    pub order_no: String,
    /// Settled amount in whole CNY, truncated.
    pub amount: u64,
}

/// Errors from the provider's query API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("Provider request failed: {0}")]
    Request(String),

    #[error("Provider returned status {0}")]
    Status(u16),

    #[error("Provider response invalid: {0}")]
    InvalidResponse(String),

    #[error("Provider error {code}: {message}")]
    Provider { code: i64, message: String },
}
