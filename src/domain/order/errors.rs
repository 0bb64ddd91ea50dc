//! Order-specific error types.
//!
//! # Response Code Mapping
//!
//! Every failure is answered with HTTP 200 and a business code in the body.
//!
//! | Error | Code |
//! |-------|------|
//! | ValidationFailed | 400 |
//! | UnsupportedCurrency | 417 |
//! | BelowMinimum | 417 |
//! | ConversionFailed | 502 |
//! | CreateFailed | 500 |
//! | StatusUnavailable | 500 |

use thiserror::Error;

/// Errors raised while creating or querying orders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Request payload was malformed or incomplete.
    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    /// Currency is not in the supported table.
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// Amount after conversion is below 5.00 CNY.
    #[error("Amount {amount_fen} fen is below the 5.00 CNY minimum")]
    BelowMinimum { amount_fen: i64 },

    /// The exchange-rate lookup failed.
    #[error("Currency conversion failed: {0}")]
    ConversionFailed(String),

    /// The ledger rejected the new order.
    #[error("Order creation failed: {0}")]
    CreateFailed(String),

    /// The ledger could not be read.
    #[error("Order status unavailable: {0}")]
    StatusUnavailable(String),
}

impl OrderError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        OrderError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unsupported_currency(code: impl Into<String>) -> Self {
        OrderError::UnsupportedCurrency(code.into())
    }

    pub fn below_minimum(amount_fen: i64) -> Self {
        OrderError::BelowMinimum { amount_fen }
    }

    pub fn conversion_failed(reason: impl Into<String>) -> Self {
        OrderError::ConversionFailed(reason.into())
    }

    pub fn create_failed(reason: impl Into<String>) -> Self {
        OrderError::CreateFailed(reason.into())
    }

    pub fn status_unavailable(reason: impl Into<String>) -> Self {
        OrderError::StatusUnavailable(reason.into())
    }

    /// Business code reported in the response body.
    pub fn code(&self) -> u16 {
        match self {
            OrderError::ValidationFailed { .. } => 400,
            OrderError::UnsupportedCurrency(_) | OrderError::BelowMinimum { .. } => 417,
            OrderError::ConversionFailed(_) => 502,
            OrderError::CreateFailed(_) | OrderError::StatusUnavailable(_) => 500,
        }
    }

    /// Message safe to return to the caller.
    ///
    /// Upstream and storage causes stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            OrderError::ValidationFailed { message, .. } => message.clone(),
            OrderError::UnsupportedCurrency(_) => "unsupported currency".to_string(),
            OrderError::BelowMinimum { .. } => {
                "CNY amount must be at least 5.00".to_string()
            }
            OrderError::ConversionFailed(_) => "currency conversion failed".to_string(),
            OrderError::CreateFailed(_) => "failed to create order".to_string(),
            OrderError::StatusUnavailable(_) => "failed to query order status".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_response_convention() {
        assert_eq!(OrderError::validation("body", "malformed").code(), 400);
        assert_eq!(OrderError::unsupported_currency("XYZ").code(), 417);
        assert_eq!(OrderError::below_minimum(499).code(), 417);
        assert_eq!(OrderError::conversion_failed("timeout").code(), 502);
        assert_eq!(OrderError::create_failed("locked").code(), 500);
        assert_eq!(OrderError::status_unavailable("locked").code(), 500);
    }

    #[test]
    fn public_message_hides_upstream_cause() {
        let err = OrderError::conversion_failed("dns error: api.exchangerate.host");
        assert_eq!(err.public_message(), "currency conversion failed");
        assert!(err.to_string().contains("dns error"));
    }

    #[test]
    fn validation_message_is_passed_through() {
        let err = OrderError::validation("order_no", "missing order_no");
        assert_eq!(err.public_message(), "missing order_no");
    }
}
