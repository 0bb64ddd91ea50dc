//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `OrderLedger` - Persistent order records and the paid flag
//! - `PaymentProvider` - Provider checkout links and settlement queries
//! - `CurrencyConverter` - Exchange-rate lookup into CNY
//! - `OrderNotifier` - Single delivery attempt to the origin site's notify URL

mod currency_converter;
mod order_ledger;
mod order_notifier;
mod payment_provider;

pub use currency_converter::{ConversionError, CurrencyConverter};
pub use order_ledger::{LedgerError, OrderLedger};
pub use order_notifier::{NotifyError, OrderNotifier};
pub use payment_provider::{PaymentError, PaymentProvider, Settlement};
