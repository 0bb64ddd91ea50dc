//! Order domain module.
//!
//! Handles the order record, amount rules, and the supported currency table.
//!
//! # Module Structure
//!
//! - `amount` - Minor/major unit formatting and settlement amount parsing
//! - `currency` - Supported currencies and their minor-unit divisors
//! - `record` - Order ledger row and the `created -> paid` state machine
//! - `errors` - Order errors and their response codes

mod amount;
mod currency;
mod errors;
mod record;

pub use amount::{
    cny_minor_from_major, format_major, normalize_major, parse_settled_amount,
    MIN_ORDER_AMOUNT_FEN,
};
pub use currency::Currency;
pub use errors::OrderError;
pub use record::{OrderRecord, OrderStatus};
