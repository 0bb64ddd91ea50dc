//! Afdian open API types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Success value of the `ec` field.
pub(super) const EC_OK: i64 = 200;

/// Parameter blob of `query-order`.
#[derive(Debug, Serialize)]
pub(super) struct QueryOrderParams<'a> {
    pub out_trade_no: &'a str,
}

/// Response of `POST /api/open/query-order`.
#[derive(Debug, Deserialize)]
pub(super) struct QueryOrderResponse {
    #[serde(default)]
    pub ec: Option<i64>,
    #[serde(default)]
    pub em: Option<String>,
    #[serde(default)]
    pub data: Option<QueryOrderData>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct QueryOrderData {
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub list: Vec<QueryOrderItem>,
}

#[derive(Debug, Deserialize)]
pub(super) struct QueryOrderItem {
    /// Arrives as either a string (`"10.00"`) or a number.
    #[serde(default)]
    pub total_amount: Value,
    #[serde(default)]
    pub remark: String,
}

/// Payment callback pushed by Afdian: `{"data": {"order": {...}}}`.
///
/// Order fields are loosely typed, so they are kept as raw JSON and read
/// through the accessors.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackPayload {
    #[serde(default)]
    data: Option<CallbackData>,
}

#[derive(Debug, Default, Deserialize)]
struct CallbackData {
    #[serde(default)]
    order: Option<Map<String, Value>>,
}

impl CallbackPayload {
    fn field(&self, name: &str) -> String {
        self.data
            .as_ref()
            .and_then(|data| data.order.as_ref())
            .and_then(|order| order.get(name))
            .map(json_text)
            .unwrap_or_default()
    }

    /// Provider trade number.
    pub fn out_trade_no(&self) -> String {
        self.field("out_trade_no")
    }

    /// Free-text remark; carries the origin order number.
    pub fn remark(&self) -> String {
        self.field("remark")
    }

    /// Paid amount in major units, as text.
    pub fn total_amount(&self) -> String {
        self.field("total_amount")
    }
}

/// Acknowledgement Afdian expects for every callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallbackAck {
    pub ec: i64,
    pub em: String,
}

impl CallbackAck {
    pub fn ok() -> Self {
        Self {
            ec: EC_OK,
            em: String::new(),
        }
    }
}

/// Renders a loosely typed JSON scalar as text.
///
/// Strings are taken verbatim, numbers use their JSON spelling and `null`
/// becomes empty.
pub(super) fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_text_handles_strings_and_numbers() {
        assert_eq!(json_text(&json!("10.00")), "10.00");
        assert_eq!(json_text(&json!(10)), "10");
        assert_eq!(json_text(&json!(10.5)), "10.5");
        assert_eq!(json_text(&Value::Null), "");
    }

    #[test]
    fn response_tolerates_missing_fields() {
        let parsed: QueryOrderResponse = serde_json::from_str(r#"{"ec":200}"#).unwrap();
        assert_eq!(parsed.ec, Some(200));
        assert!(parsed.data.is_none());

        let parsed: QueryOrderResponse =
            serde_json::from_str(r#"{"data":{"list":[{"remark":"A1"}]}}"#).unwrap();
        let data = parsed.data.unwrap();
        assert_eq!(data.total_count, 0);
        assert_eq!(data.list[0].remark, "A1");
        assert!(data.list[0].total_amount.is_null());
    }

    #[test]
    fn callback_fields_are_read_as_text() {
        let payload: CallbackPayload = serde_json::from_value(json!({
            "ec": 200,
            "data": {
                "type": "order",
                "order": {"out_trade_no": "T1", "remark": "A1", "total_amount": "10.00"}
            }
        }))
        .unwrap();

        assert_eq!(payload.out_trade_no(), "T1");
        assert_eq!(payload.remark(), "A1");
        assert_eq!(payload.total_amount(), "10.00");
    }

    #[test]
    fn callback_numeric_and_missing_fields() {
        let payload: CallbackPayload = serde_json::from_value(json!({
            "data": {"order": {"out_trade_no": 12345, "total_amount": 10}}
        }))
        .unwrap();

        assert_eq!(payload.out_trade_no(), "12345");
        assert_eq!(payload.total_amount(), "10");
        assert_eq!(payload.remark(), "");

        let empty: CallbackPayload = serde_json::from_value(json!({"data": null})).unwrap();
        assert_eq!(empty.out_trade_no(), "");
    }

    #[test]
    fn ack_serializes_as_expected() {
        let body = serde_json::to_string(&CallbackAck::ok()).unwrap();
        assert_eq!(body, r#"{"ec":200,"em":""}"#);
    }

    #[test]
    fn params_serialize_compactly() {
        let params = serde_json::to_string(&QueryOrderParams { out_trade_no: "T1" }).unwrap();
        assert_eq!(params, r#"{"out_trade_no":"T1"}"#);
    }
}
