//! SQLite adapters.

mod order_ledger;

pub use order_ledger::SqliteOrderLedger;
