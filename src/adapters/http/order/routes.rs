//! Axum router configuration for order endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{afdian_callback, check_order_status, create_order, OrderAppState};

/// Create the site-facing order router.
///
/// # Routes (signed with the communication key)
///
/// - `POST /order` - Create an order, returns the checkout link
/// - `GET /order` - Check an order's paid status
pub fn site_router() -> Router<OrderAppState> {
    Router::new().route("/order", post(create_order).get(check_order_status))
}

/// Create the provider callback router.
///
/// # Routes (unsigned, reconciled via the query API)
///
/// - `POST /afdian` - Payment callback; always acknowledged
///
/// Reconciliation runs the full notification sequence before the ack, so this
/// router must not sit behind a request timeout.
pub fn callback_router() -> Router<OrderAppState> {
    Router::new().route("/afdian", post(afdian_callback))
}
