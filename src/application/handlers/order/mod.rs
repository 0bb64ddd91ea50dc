//! Order handlers.
//!
//! ## Commands
//! - Creating an order and its checkout link
//! - Reconciling a provider payment callback
//! - Notifying the origin site of a paid order (bounded retries)
//!
//! ## Queries
//! - Checking an order's paid status

mod check_order_status;
mod create_order;
mod handle_callback;
mod notify_origin;

// Commands
pub use create_order::{CreateOrderCommand, CreateOrderHandler, CreateOrderResult};
pub use handle_callback::{CallbackOutcome, HandleCallbackCommand, HandleCallbackHandler};
pub use notify_origin::{NotifyOriginCommand, NotifyOriginHandler, NotifyOutcome, RetryPolicy};

// Queries
pub use check_order_status::{CheckOrderStatusHandler, CheckOrderStatusQuery};
