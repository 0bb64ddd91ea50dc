//! Exchange rate adapter.

mod exchange_rate_client;

pub use exchange_rate_client::ExchangeRateClient;
