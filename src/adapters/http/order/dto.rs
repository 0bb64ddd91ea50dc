//! HTTP DTOs (Data Transfer Objects) for order endpoints.
//!
//! Every response is HTTP 200; the `code` field carries the outcome.

use serde::{Deserialize, Serialize};

use crate::application::handlers::order::{CheckOrderStatusQuery, CreateOrderCommand};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /order`. Missing fields take their zero value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub order_no: String,
    /// Minor units of `currency`.
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub notify_url: String,
}

impl From<CreateOrderRequest> for CreateOrderCommand {
    fn from(request: CreateOrderRequest) -> Self {
        CreateOrderCommand {
            order_no: request.order_no,
            amount: request.amount,
            currency: request.currency,
            notify_url: request.notify_url,
        }
    }
}

/// Query string of `GET /order`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderStatusParams {
    #[serde(default)]
    pub order_no: String,
    /// `<signature>:<timestamp>`, percent-encoded.
    pub sign: Option<String>,
}

impl OrderStatusParams {
    pub fn to_query(&self) -> CheckOrderStatusQuery {
        CheckOrderStatusQuery {
            order_no: self.order_no.clone(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Success envelope: `{"code": 0, "data": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiSuccess<T> {
    pub code: u16,
    pub data: T,
}

impl<T> ApiSuccess<T> {
    pub fn new(data: T) -> Self {
        Self { code: 0, data }
    }
}

/// Failure envelope: `{"code": <non-zero>, "error": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiFailure {
    pub code: u16,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_defaults_missing_fields() {
        let request: CreateOrderRequest = serde_json::from_str(r#"{"order_no":"A1"}"#).unwrap();
        assert_eq!(request.order_no, "A1");
        assert_eq!(request.amount, 0);
        assert!(request.currency.is_empty());
    }

    #[test]
    fn envelopes_serialize() {
        let ok = serde_json::to_value(ApiSuccess::new("PAID")).unwrap();
        assert_eq!(ok, serde_json::json!({"code": 0, "data": "PAID"}));

        let failure = serde_json::to_value(ApiFailure {
            code: 412,
            error: "invalid signature".to_string(),
        })
        .unwrap();
        assert_eq!(failure, serde_json::json!({"code": 412, "error": "invalid signature"}));
    }
}
