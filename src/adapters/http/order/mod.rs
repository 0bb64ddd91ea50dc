//! Order HTTP adapter.
//!
//! Exposes order creation and status to the storage site, and the payment
//! callback to Afdian.

mod dto;
mod handlers;
mod routes;
mod site_auth;

pub use dto::{ApiFailure, ApiSuccess, CreateOrderRequest, OrderStatusParams};
pub use handlers::{OrderApiError, OrderAppState};
pub use routes::{callback_router, site_router};
pub use site_auth::{legacy_unescape, SignedClaim, SITE_URL_HEADER};
