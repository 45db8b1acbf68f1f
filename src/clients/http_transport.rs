use std::time::Duration;

use async_trait::async_trait;
use reqwest;
use serde_json::Value;
use tracing::debug;

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a JSON body and hands back whatever came back.
///
/// `Err` means no response was received at all (connect failure, timeout).
/// Non-2xx statuses are still `Ok`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post_json(&self, path: &str, body: &Value) -> Result<TransportResponse, String>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, path: &str, body: &Value) -> Result<TransportResponse, String> {
        let url = self.endpoint(path);
        debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| e.to_string())?; // read the body once
        debug!(status, bytes = body.len(), "response received");
        Ok(TransportResponse { status, body })
    }
}
