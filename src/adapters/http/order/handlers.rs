//! HTTP handlers for order endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Json, Query, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::IntoResponse;

use crate::adapters::afdian::{CallbackAck, CallbackPayload};
use crate::application::handlers::order::{
    CheckOrderStatusHandler, CreateOrderHandler, HandleCallbackCommand, HandleCallbackHandler,
    NotifyOriginHandler, RetryPolicy,
};
use crate::domain::order::{OrderError, OrderStatus};
use crate::domain::signing::{CanonicalRequest, RequestVerifier, SignatureError};
use crate::ports::{CurrencyConverter, OrderLedger, OrderNotifier, PaymentProvider};

use super::dto::{ApiFailure, ApiSuccess, CreateOrderRequest, OrderStatusParams};
use super::site_auth::{check_site, signing_path, write_request, SignedClaim};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers.
#[derive(Clone)]
pub struct OrderAppState {
    pub ledger: Arc<dyn OrderLedger>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub currency_converter: Arc<dyn CurrencyConverter>,
    pub order_notifier: Arc<dyn OrderNotifier>,
    pub retry_policy: RetryPolicy,
    pub verifier: Arc<RequestVerifier>,
    /// Configured site URL without its trailing `/`.
    pub site_url: Arc<str>,
}

impl OrderAppState {
    /// Create handlers on demand from the shared state.
    pub fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(
            self.ledger.clone(),
            self.payment_provider.clone(),
            self.currency_converter.clone(),
        )
    }

    pub fn callback_handler(&self) -> HandleCallbackHandler {
        HandleCallbackHandler::new(
            self.ledger.clone(),
            self.payment_provider.clone(),
            Arc::new(NotifyOriginHandler::new(
                self.order_notifier.clone(),
                self.retry_policy,
            )),
        )
    }

    pub fn order_status_handler(&self) -> CheckOrderStatusHandler {
        CheckOrderStatusHandler::new(self.ledger.clone())
    }

    fn verify(
        &self,
        request: &CanonicalRequest<'_>,
        claim: &SignedClaim,
    ) -> Result<(), OrderApiError> {
        self.verifier
            .verify(request, &claim.signature, &claim.timestamp)
            .map_err(OrderApiError::from)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Site Endpoints (signed)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /order - Create an order and return the checkout link
pub async fn create_order(
    State(state): State<OrderAppState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, OrderApiError> {
    check_site(&headers, &state.site_url)?;
    let claim = SignedClaim::from_authorization(&headers)?;
    let path = signing_path(&uri);
    state.verify(&write_request(&path, &headers, &body), &claim)?;

    let request: CreateOrderRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Malformed create-order body");
        OrderError::validation("body", "malformed request body")
    })?;

    let result = state.create_order_handler().handle(request.into()).await?;

    Ok(Json(ApiSuccess::new(result.checkout_url)))
}

/// GET /order - Check whether an order is paid
pub async fn check_order_status(
    State(state): State<OrderAppState>,
    uri: Uri,
    headers: HeaderMap,
    query: Result<Query<OrderStatusParams>, QueryRejection>,
) -> Result<impl IntoResponse, OrderApiError> {
    check_site(&headers, &state.site_url)?;
    let Query(params) = query.map_err(|e| {
        tracing::warn!(error = %e, "Undecodable order-status query");
        OrderError::validation("query", "malformed query string")
    })?;
    let claim = SignedClaim::from_sign_param(params.sign.as_deref())?;
    let path = signing_path(&uri);
    state.verify(&CanonicalRequest::read(&path), &claim)?;

    if params.order_no.is_empty() {
        return Err(OrderError::validation("order_no", "missing order_no").into());
    }

    let status: OrderStatus = state.order_status_handler().handle(params.to_query()).await?;

    Ok(Json(ApiSuccess::new(status)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Provider Callback (unsigned, reconciled against the query API)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /afdian - Afdian payment callback; always acknowledged
pub async fn afdian_callback(State(state): State<OrderAppState>, body: Bytes) -> Json<CallbackAck> {
    match serde_json::from_slice::<CallbackPayload>(&body) {
        Ok(payload) => {
            let cmd = HandleCallbackCommand {
                out_trade_no: payload.out_trade_no(),
                order_no: payload.remark(),
                total_amount: payload.total_amount(),
            };
            tracing::info!(
                out_trade_no = %cmd.out_trade_no,
                order_no = %cmd.order_no,
                amount = %cmd.total_amount,
                "Afdian callback received"
            );
            let outcome = state.callback_handler().handle(cmd).await;
            tracing::info!(?outcome, "Afdian callback reconciled");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Unparseable Afdian callback acknowledged");
        }
    }

    Json(CallbackAck::ok())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts order and signature errors to HTTP responses.
///
/// The transport status is always 200; the body carries the business code.
#[derive(Debug)]
pub enum OrderApiError {
    /// Site or signature check failed (412).
    Rejected(String),
    /// Order operation failed.
    Order(OrderError),
}

impl OrderApiError {
    pub fn rejected(message: impl Into<String>) -> Self {
        OrderApiError::Rejected(message.into())
    }

    pub fn code(&self) -> u16 {
        match self {
            OrderApiError::Rejected(_) => 412,
            OrderApiError::Order(e) => e.code(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            OrderApiError::Rejected(message) => message.clone(),
            OrderApiError::Order(e) => e.public_message(),
        }
    }
}

impl From<OrderError> for OrderApiError {
    fn from(err: OrderError) -> Self {
        OrderApiError::Order(err)
    }
}

impl From<SignatureError> for OrderApiError {
    fn from(err: SignatureError) -> Self {
        OrderApiError::Rejected(err.to_string())
    }
}

impl IntoResponse for OrderApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ApiFailure {
            code: self.code(),
            error: self.message(),
        };
        (StatusCode::OK, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_errors_map_to_412_with_their_message() {
        let err = OrderApiError::from(SignatureError::TimestampExpired);
        assert_eq!(err.code(), 412);
        assert_eq!(err.message(), "timestamp verification failed");
    }

    #[test]
    fn order_errors_keep_their_code_and_hide_causes() {
        let err = OrderApiError::from(OrderError::conversion_failed("upstream 503 from host"));
        assert_eq!(err.code(), 502);
        assert_eq!(err.message(), "currency conversion failed");
    }

    #[test]
    fn error_response_is_http_200() {
        let response = OrderApiError::rejected("invalid signature").into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
