//! Order ledger port.
//!
//! Defines the contract for persisting orders and their paid flag.
//!
//! # Design
//!
//! - **Unique key**: one row per `order_no`
//! - **Immutable amount**: stored once as a two-decimal string
//! - **Monotonic flag**: `mark_paid` only ever sets `is_paid`, and repeating it
//!   is a no-op
//! - **Serialized access**: implementations run at most one operation at a time

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::order::OrderRecord;

/// Errors raised by ledger implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Order already exists: {0}")]
    Duplicate(String),

    #[error("Ledger storage error: {0}")]
    Storage(String),
}

/// Repository port for the order ledger.
#[async_trait]
pub trait OrderLedger: Send + Sync {
    /// Record a new unpaid order.
    ///
    /// `amount_fen` is the CNY amount in minor units; it is stored as a
    /// decimal string with two fractional digits.
    ///
    /// # Errors
    ///
    /// - `Duplicate` if the order identifier is already recorded
    /// - `Storage` on persistence failure
    async fn insert(
        &self,
        order_no: &str,
        amount_fen: i64,
        notify_url: &str,
    ) -> Result<(), LedgerError>;

    /// Find an order by identifier.
    ///
    /// Returns `None` if not found.
    async fn find(&self, order_no: &str) -> Result<Option<OrderRecord>, LedgerError>;

    /// Flip the paid flag. Unknown orders and already-paid orders are left as is.
    async fn mark_paid(&self, order_no: &str) -> Result<(), LedgerError>;

    /// Read the paid flag.
    ///
    /// Returns `None` if the order is unknown.
    async fn is_paid(&self, order_no: &str) -> Result<Option<bool>, LedgerError>;
}
