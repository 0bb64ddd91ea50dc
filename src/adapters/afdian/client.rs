//! Afdian client - Implementation of PaymentProvider for the Afdian open API.
//!
//! # Query signing
//!
//! `query-order` is a form POST carrying `user_id`, `params` (a JSON blob),
//! `ts` (issued-at, seconds) and
//! `sign = md5_hex(token + "params" + params + "ts" + ts + "user_id" + user_id)`.

use async_trait::async_trait;
use md5::{Digest, Md5};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::domain::order::parse_settled_amount;
use crate::ports::{PaymentError, PaymentProvider, Settlement};

use super::types::{json_text, QueryOrderParams, QueryOrderResponse, EC_OK};

/// Afdian checkout link builder and settlement query client.
pub struct AfdianClient {
    client: Client,
    user_id: String,
    token: SecretString,
    checkout_url: Url,
    query_url: Url,
}

impl AfdianClient {
    /// Creates a client for the account `user_id` against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::Request` if `base_url` is not a valid URL.
    pub fn new(
        user_id: impl Into<String>,
        token: SecretString,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, PaymentError> {
        let base = base_url.trim_end_matches('/');
        let parse = |path: &str| {
            Url::parse(&format!("{}{}", base, path))
                .map_err(|e| PaymentError::Request(format!("Invalid provider URL: {}", e)))
        };

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            client,
            user_id: user_id.into(),
            token,
            checkout_url: parse("/order/create")?,
            query_url: parse("/api/open/query-order")?,
        })
    }

    /// Signature over the query parameters.
    fn sign(&self, params: &str, ts: &str) -> String {
        let payload = format!(
            "{}params{}ts{}user_id{}",
            self.token.expose_secret(),
            params,
            ts,
            self.user_id
        );
        hex::encode(Md5::digest(payload.as_bytes()))
    }
}

#[async_trait]
impl PaymentProvider for AfdianClient {
    fn checkout_url(&self, order_no: &str, amount: &str) -> String {
        let mut url = self.checkout_url.clone();
        url.query_pairs_mut()
            .append_pair("user_id", &self.user_id)
            .append_pair("remark", order_no)
            .append_pair("custom_price", amount);
        url.into()
    }

    async fn query_settlement(
        &self,
        out_trade_no: &str,
    ) -> Result<Option<Settlement>, PaymentError> {
        let params = serde_json::to_string(&QueryOrderParams { out_trade_no })
            .map_err(|e| PaymentError::Request(e.to_string()))?;
        let ts = chrono::Utc::now().timestamp().to_string();
        let sign = self.sign(&params, &ts);

        tracing::debug!(out_trade_no, ts = %ts, "Querying provider order");

        let response = self
            .client
            .post(self.query_url.clone())
            .form(&[
                ("user_id", self.user_id.as_str()),
                ("params", params.as_str()),
                ("ts", ts.as_str()),
                ("sign", sign.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PaymentError::Request("Provider query timed out".to_string())
                } else {
                    PaymentError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PaymentError::Status(status.as_u16()));
        }

        let body: QueryOrderResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        if let Some(code) = body.ec.filter(|ec| *ec != EC_OK) {
            return Err(PaymentError::Provider {
                code,
                message: body.em.unwrap_or_default(),
            });
        }

        let data = body.data.unwrap_or_default();
        tracing::debug!(
            out_trade_no,
            total_count = data.total_count,
            listed = data.list.len(),
            "Provider query answered"
        );
        if data.total_count == 0 {
            return Ok(None);
        }
        let Some(item) = data.list.into_iter().next() else {
            return Ok(None);
        };

        Ok(Some(Settlement {
            out_trade_no: out_trade_no.to_string(),
            order_no: item.remark,
            amount: parse_settled_amount(&json_text(&item.total_amount)),
        }))
    }
}
