//! HandleCallbackHandler - Reconciles a provider payment callback against the
//! provider's query API and the local ledger.
//!
//! The callback body is never trusted on its own. An order is marked paid only
//! when all of the following hold:
//!
//! 1. The query API reports a settlement for the trade number.
//! 2. The settlement's remark equals the callback's order number.
//! 3. The settled amount is positive and equals the integer part of the ledger amount.
//! 4. The ledger row exists.
//! 5. The callback amount, normalized to two decimals, equals the ledger amount.
//!
//! The caller always acknowledges the provider, whatever the outcome.

use std::sync::Arc;

use crate::domain::order::normalize_major;
use crate::ports::{OrderLedger, PaymentProvider};

use super::notify_origin::{NotifyOriginCommand, NotifyOriginHandler, NotifyOutcome};

/// Command built from a provider callback.
#[derive(Debug, Clone)]
pub struct HandleCallbackCommand {
    /// Provider trade number.
    pub out_trade_no: String,
    /// Origin order number, carried in the callback's remark.
    pub order_no: String,
    /// Callback-reported amount in major units, as text.
    pub total_amount: String,
}

/// What reconciliation concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Order confirmed and marked paid; one notification sequence ran.
    Paid { notify: NotifyOutcome },
    /// The query API does not (yet) know the trade.
    NotSettled,
    /// The query API call failed.
    QueryFailed,
    /// The settlement belongs to another order.
    RemarkMismatch,
    /// No ledger row for the order.
    UnknownOrder,
    /// Settled or reported amount disagrees with the ledger.
    AmountMismatch,
    /// The ledger could not be read or updated.
    LedgerUnavailable,
}

impl CallbackOutcome {
    pub fn is_paid(&self) -> bool {
        matches!(self, CallbackOutcome::Paid { .. })
    }
}

/// Handler for provider payment callbacks.
pub struct HandleCallbackHandler {
    ledger: Arc<dyn OrderLedger>,
    provider: Arc<dyn PaymentProvider>,
    notifier: Arc<NotifyOriginHandler>,
}

impl HandleCallbackHandler {
    pub fn new(
        ledger: Arc<dyn OrderLedger>,
        provider: Arc<dyn PaymentProvider>,
        notifier: Arc<NotifyOriginHandler>,
    ) -> Self {
        Self {
            ledger,
            provider,
            notifier,
        }
    }

    pub async fn handle(&self, cmd: HandleCallbackCommand) -> CallbackOutcome {
        // 1. Confirm with the provider
        let settlement = match self.provider.query_settlement(&cmd.out_trade_no).await {
            Ok(Some(settlement)) => settlement,
            Ok(None) => {
                tracing::info!(out_trade_no = %cmd.out_trade_no, "Trade not settled at provider");
                return CallbackOutcome::NotSettled;
            }
            Err(e) => {
                tracing::error!(out_trade_no = %cmd.out_trade_no, error = %e, "Settlement query failed");
                return CallbackOutcome::QueryFailed;
            }
        };

        if settlement.order_no != cmd.order_no {
            tracing::warn!(
                out_trade_no = %cmd.out_trade_no,
                order_no = %cmd.order_no,
                remark = %settlement.order_no,
                "Settlement remark does not match callback order"
            );
            return CallbackOutcome::RemarkMismatch;
        }

        // 2. Load the ledger row
        let record = match self.ledger.find(&cmd.order_no).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::warn!(order_no = %cmd.order_no, "Callback for unknown order");
                return CallbackOutcome::UnknownOrder;
            }
            Err(e) => {
                tracing::error!(order_no = %cmd.order_no, error = %e, "Ledger lookup failed");
                return CallbackOutcome::LedgerUnavailable;
            }
        };

        // 3. Cross-check amounts
        let reported = normalize_major(&cmd.total_amount);
        let settled_matches =
            settlement.amount > 0 && settlement.amount == record.amount_major_units();
        if !settled_matches || reported.as_deref() != Some(record.amount.as_str()) {
            tracing::warn!(
                order_no = %cmd.order_no,
                amount = %record.amount,
                settled = settlement.amount,
                reported = %cmd.total_amount,
                "Callback amount does not match ledger"
            );
            return CallbackOutcome::AmountMismatch;
        }

        // 4. Mark paid (no-op when already paid)
        if let Err(e) = self.ledger.mark_paid(&cmd.order_no).await {
            tracing::error!(order_no = %cmd.order_no, error = %e, "Failed to mark order paid");
            return CallbackOutcome::LedgerUnavailable;
        }
        tracing::info!(
            order_no = %cmd.order_no,
            amount = %record.amount,
            already_paid = record.is_paid,
            "Order marked paid"
        );

        // 5. Tell the origin site
        let notify = self
            .notifier
            .handle(NotifyOriginCommand {
                order_no: record.order_no,
                notify_url: record.notify_url,
            })
            .await;

        CallbackOutcome::Paid { notify }
    }
}
