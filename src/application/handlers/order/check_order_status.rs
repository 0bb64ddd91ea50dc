//! CheckOrderStatusHandler - Query handler for an order's paid flag.

use std::sync::Arc;

use crate::domain::order::{OrderError, OrderStatus};
use crate::ports::OrderLedger;

/// Query for an order's status.
#[derive(Debug, Clone)]
pub struct CheckOrderStatusQuery {
    pub order_no: String,
}

/// Handler for order status queries.
///
/// Unknown orders read as [`OrderStatus::Unpaid`] so that callers cannot probe
/// which order numbers exist.
pub struct CheckOrderStatusHandler {
    ledger: Arc<dyn OrderLedger>,
}

impl CheckOrderStatusHandler {
    pub fn new(ledger: Arc<dyn OrderLedger>) -> Self {
        Self { ledger }
    }

    pub async fn handle(&self, query: CheckOrderStatusQuery) -> Result<OrderStatus, OrderError> {
        let paid = self.ledger.is_paid(&query.order_no).await.map_err(|e| {
            tracing::error!(order_no = %query.order_no, error = %e, "Failed to read order status");
            OrderError::status_unavailable(e.to_string())
        })?;

        let status = OrderStatus::from_paid_flag(paid);
        tracing::debug!(order_no = %query.order_no, status = status.as_str(), "Order status checked");
        Ok(status)
    }
}
