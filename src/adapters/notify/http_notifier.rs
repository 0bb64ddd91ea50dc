//! HTTP implementation of OrderNotifier.
//!
//! A notification is a plain `GET` of the URL the site registered with the
//! order. It counts as delivered only on HTTP 200 with a JSON body whose
//! `code` is 0.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{NotifyError, OrderNotifier};

/// Site acknowledgement body.
#[derive(Debug, Deserialize)]
struct NotifyAck {
    code: i64,
}

/// Single-attempt notifier; retries live in the application layer.
pub struct HttpOrderNotifier {
    client: Client,
}

impl HttpOrderNotifier {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

#[async_trait]
impl OrderNotifier for HttpOrderNotifier {
    async fn notify(&self, notify_url: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .get(notify_url)
            .send()
            .await
            .map_err(|e| NotifyError::Request(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(NotifyError::Status(status.as_u16()));
        }

        let ack: NotifyAck = response
            .json()
            .await
            .map_err(|e| NotifyError::InvalidResponse(e.to_string()))?;

        match ack.code {
            0 => Ok(()),
            code => Err(NotifyError::Rejected(code)),
        }
    }
}
