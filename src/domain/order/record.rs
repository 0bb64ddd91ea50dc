//! Order ledger record and the order status state machine.

use serde::{Deserialize, Serialize};

use super::amount::{format_major, parse_settled_amount};

/// One row of the order ledger.
///
/// `amount` is fixed at creation. `is_paid` only ever moves from `false`
/// to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Origin-assigned order identifier, unique within the ledger.
    pub order_no: String,
    /// Expected settlement in CNY, two fractional digits.
    pub amount: String,
    /// Where the origin site wants to be pinged on settlement.
    pub notify_url: String,
    /// Settlement confirmed.
    pub is_paid: bool,
}

impl OrderRecord {
    /// Creates an unpaid record from an integer CNY minor-unit amount.
    pub fn new(order_no: impl Into<String>, amount_fen: i64, notify_url: impl Into<String>) -> Self {
        Self {
            order_no: order_no.into(),
            amount: format_major(amount_fen),
            notify_url: notify_url.into(),
            is_paid: false,
        }
    }

    /// Integer part of the stored amount, comparable with provider settlements.
    pub fn amount_major_units(&self) -> u64 {
        parse_settled_amount(&self.amount)
    }

    pub fn status(&self) -> OrderStatus {
        OrderStatus::from_paid_flag(Some(self.is_paid))
    }
}

/// Externally visible order status.
///
/// `created -> paid` is the only transition; `Paid` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Paid,
    Unpaid,
}

impl OrderStatus {
    /// Maps a ledger lookup to a status. Unknown orders read as unpaid.
    pub fn from_paid_flag(paid: Option<bool>) -> Self {
        match paid {
            Some(true) => OrderStatus::Paid,
            Some(false) | None => OrderStatus::Unpaid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Paid => "PAID",
            OrderStatus::Unpaid => "UNPAID",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_unpaid_with_formatted_amount() {
        let record = OrderRecord::new("A1", 1000, "https://x/y");
        assert_eq!(record.amount, "10.00");
        assert!(!record.is_paid);
        assert_eq!(record.status(), OrderStatus::Unpaid);
    }

    #[test]
    fn amount_major_units_truncates() {
        let record = OrderRecord::new("A1", 1099, "https://x/y");
        assert_eq!(record.amount_major_units(), 10);
    }

    #[test]
    fn unknown_order_reads_as_unpaid() {
        assert_eq!(OrderStatus::from_paid_flag(None), OrderStatus::Unpaid);
        assert_eq!(OrderStatus::from_paid_flag(Some(false)), OrderStatus::Unpaid);
        assert_eq!(OrderStatus::from_paid_flag(Some(true)), OrderStatus::Paid);
    }

    #[test]
    fn status_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&OrderStatus::Paid).unwrap(), "\"PAID\"");
        assert_eq!(OrderStatus::Unpaid.as_str(), "UNPAID");
    }
}
