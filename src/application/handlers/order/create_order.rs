//! CreateOrderHandler - Command handler for recording a new order and
//! returning its provider checkout link.

use std::sync::Arc;

use crate::domain::order::{
    cny_minor_from_major, format_major, Currency, OrderError, MIN_ORDER_AMOUNT_FEN,
};
use crate::ports::{CurrencyConverter, OrderLedger, PaymentProvider};

/// Command to create an order.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    /// Origin-assigned order identifier.
    pub order_no: String,
    /// Amount in minor units of `currency`.
    pub amount: i64,
    /// ISO 4217 code, case-insensitive.
    pub currency: String,
    /// Where to report settlement.
    pub notify_url: String,
}

/// Result of successful order creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderResult {
    pub order_no: String,
    /// Recorded CNY amount, two fractional digits.
    pub amount: String,
    /// Provider checkout link to redirect the payer to.
    pub checkout_url: String,
}

/// Handler for creating orders.
///
/// Converts foreign amounts to CNY, enforces the 5.00 CNY minimum, writes the
/// ledger row and builds the checkout link.
pub struct CreateOrderHandler {
    ledger: Arc<dyn OrderLedger>,
    provider: Arc<dyn PaymentProvider>,
    converter: Arc<dyn CurrencyConverter>,
}

impl CreateOrderHandler {
    pub fn new(
        ledger: Arc<dyn OrderLedger>,
        provider: Arc<dyn PaymentProvider>,
        converter: Arc<dyn CurrencyConverter>,
    ) -> Self {
        Self {
            ledger,
            provider,
            converter,
        }
    }

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<CreateOrderResult, OrderError> {
        // 1. Validate required fields
        if cmd.order_no.trim().is_empty() {
            return Err(OrderError::validation("order_no", "order_no is required"));
        }
        if cmd.notify_url.trim().is_empty() {
            return Err(OrderError::validation("notify_url", "notify_url is required"));
        }

        // 2. Normalize to CNY minor units
        let currency: Currency = cmd.currency.parse()?;
        let amount_fen = if currency.is_cny() {
            cmd.amount
        } else {
            self.convert(currency, cmd.amount).await?
        };

        // 3. Enforce the minimum
        if amount_fen < MIN_ORDER_AMOUNT_FEN {
            tracing::info!(order_no = %cmd.order_no, amount = amount_fen, "Order below minimum");
            return Err(OrderError::below_minimum(amount_fen));
        }

        // 4. Record the order
        self.ledger
            .insert(&cmd.order_no, amount_fen, &cmd.notify_url)
            .await
            .map_err(|e| {
                tracing::error!(order_no = %cmd.order_no, error = %e, "Failed to record order");
                OrderError::create_failed(e.to_string())
            })?;

        // 5. Build the checkout link
        let amount = format_major(amount_fen);
        let checkout_url = self.provider.checkout_url(&cmd.order_no, &amount);

        tracing::info!(order_no = %cmd.order_no, amount = %amount, "Order created");

        Ok(CreateOrderResult {
            order_no: cmd.order_no,
            amount,
            checkout_url,
        })
    }

    async fn convert(&self, currency: Currency, amount_minor: i64) -> Result<i64, OrderError> {
        let major = currency.to_major(amount_minor);
        let cny = self
            .converter
            .convert_to_cny(currency, major)
            .await
            .map_err(|e| {
                tracing::error!(currency = %currency, amount = major, error = %e, "Currency conversion failed");
                OrderError::conversion_failed(e.to_string())
            })?;
        let fen = cny_minor_from_major(cny);
        tracing::debug!(currency = %currency, amount = major, cny_fen = fen, "Converted order amount");
        Ok(fen)
    }
}
