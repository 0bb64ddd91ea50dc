//! Currency conversion port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::order::Currency;

/// Errors raised by the conversion lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Conversion request failed: {0}")]
    Request(String),

    #[error("Conversion service returned status {0}")]
    Status(u16),

    #[error("Conversion response invalid: {0}")]
    InvalidResponse(String),
}

/// Port for looking up exchange rates.
#[async_trait]
pub trait CurrencyConverter: Send + Sync {
    /// Convert `amount` major units of `from` into CNY major units.
    async fn convert_to_cny(&self, from: Currency, amount: f64) -> Result<f64, ConversionError>;
}
