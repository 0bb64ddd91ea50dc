//! In-memory order ledger for testing and development.
//!
//! Keeps rows in a HashMap behind an async lock. Not persistent.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::order::OrderRecord;
use crate::ports::{LedgerError, OrderLedger};

/// In-memory [`OrderLedger`] keyed by order number.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderLedger {
    orders: Arc<RwLock<HashMap<String, OrderRecord>>>,
}

impl InMemoryOrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded orders.
    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderLedger for InMemoryOrderLedger {
    async fn insert(
        &self,
        order_no: &str,
        amount_fen: i64,
        notify_url: &str,
    ) -> Result<(), LedgerError> {
        let mut orders = self.orders.write().await;
        if orders.contains_key(order_no) {
            return Err(LedgerError::Duplicate(order_no.to_string()));
        }
        orders.insert(
            order_no.to_string(),
            OrderRecord::new(order_no, amount_fen, notify_url),
        );
        Ok(())
    }

    async fn find(&self, order_no: &str) -> Result<Option<OrderRecord>, LedgerError> {
        Ok(self.orders.read().await.get(order_no).cloned())
    }

    async fn mark_paid(&self, order_no: &str) -> Result<(), LedgerError> {
        if let Some(record) = self.orders.write().await.get_mut(order_no) {
            record.is_paid = true;
        }
        Ok(())
    }

    async fn is_paid(&self, order_no: &str) -> Result<Option<bool>, LedgerError> {
        Ok(self
            .orders
            .read()
            .await
            .get(order_no)
            .map(|record| record.is_paid))
    }
}
