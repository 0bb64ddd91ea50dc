//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `afdian` - Afdian checkout links and order query API
//! - `exchange` - Exchange-rate lookup for non-CNY orders
//! - `notify` - Paid-order notification to the storage site
//! - `sqlite` - Persistent order ledger
//! - `memory` - In-memory order ledger (tests, development)
//! - `http` - Axum routes for the site and the provider callback

pub mod afdian;
pub mod exchange;
pub mod http;
pub mod memory;
pub mod notify;
pub mod sqlite;

pub use afdian::AfdianClient;
pub use exchange::ExchangeRateClient;
pub use memory::InMemoryOrderLedger;
pub use notify::HttpOrderNotifier;
pub use sqlite::SqliteOrderLedger;
