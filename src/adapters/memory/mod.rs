//! In-memory adapters for tests and local development.

mod order_ledger;

pub use order_ledger::InMemoryOrderLedger;
