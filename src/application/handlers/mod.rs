//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod order;

pub use order::{
    CallbackOutcome, CheckOrderStatusHandler, CheckOrderStatusQuery, CreateOrderCommand,
    CreateOrderHandler, CreateOrderResult, HandleCallbackCommand, HandleCallbackHandler,
    NotifyOriginCommand, NotifyOriginHandler, NotifyOutcome, RetryPolicy,
};
