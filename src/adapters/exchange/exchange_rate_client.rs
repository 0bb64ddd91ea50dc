//! HTTP implementation of CurrencyConverter.
//!
//! Calls `GET {base}/convert?from=<CUR>&to=CNY&amount=<major>` and reads the
//! converted amount from `{"result": <number>}`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::domain::order::Currency;
use crate::ports::{ConversionError, CurrencyConverter};

/// Exchange rate lookup client.
pub struct ExchangeRateClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    result: Option<f64>,
}

impl ExchangeRateClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn convert_url(&self) -> String {
        format!("{}/convert", self.base_url)
    }
}

#[async_trait]
impl CurrencyConverter for ExchangeRateClient {
    async fn convert_to_cny(&self, from: Currency, amount: f64) -> Result<f64, ConversionError> {
        let amount_param = format!("{:.6}", amount);
        let response = self
            .client
            .get(self.convert_url())
            .query(&[
                ("from", from.code()),
                ("to", Currency::Cny.code()),
                ("amount", amount_param.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ConversionError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConversionError::Status(status.as_u16()));
        }

        let body: ConvertResponse = response
            .json()
            .await
            .map_err(|e| ConversionError::InvalidResponse(e.to_string()))?;

        match body.result {
            Some(result) if result.is_finite() => Ok(result),
            _ => Err(ConversionError::InvalidResponse(
                "missing conversion result".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ExchangeRateClient {
        ExchangeRateClient::new(server.uri(), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn converts_with_major_amount() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/convert"))
            .and(query_param("from", "USD"))
            .and(query_param("to", "CNY"))
            .and(query_param("amount", "2.000000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": 14.5})))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server).convert_to_cny(Currency::Usd, 2.0).await;

        assert_eq!(result, Ok(14.5));
    }

    #[tokio::test]
    async fn missing_result_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
            .mount(&server)
            .await;

        let result = client_for(&server).convert_to_cny(Currency::Eur, 1.0).await;

        assert!(matches!(result, Err(ConversionError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let result = client_for(&server).convert_to_cny(Currency::Gbp, 1.0).await;

        assert_eq!(result, Err(ConversionError::Status(429)));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_request_error() {
        let client = ExchangeRateClient::new("http://127.0.0.1:9", Duration::from_secs(2));

        let result = client.convert_to_cny(Currency::Jpy, 1000.0).await;

        assert!(matches!(result, Err(ConversionError::Request(_))));
    }
}
