//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (create order, reconcile callback, notify) are kept apart
//! from the status query handler.

pub mod handlers;

pub use handlers::{
    CallbackOutcome, CheckOrderStatusHandler, CheckOrderStatusQuery, CreateOrderCommand,
    CreateOrderHandler, CreateOrderResult, HandleCallbackCommand, HandleCallbackHandler,
    NotifyOriginCommand, NotifyOriginHandler, NotifyOutcome, RetryPolicy,
};
