//! reqwest-backed transport

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, warn};

use super::Transport;
use crate::config::Config;
use crate::error::{ClientError, Result};

/// Talks JSON to the upstream REST API.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // == Send ==
    /// Sends the request and reads the JSON body whatever the status code;
    /// error statuses still carry an envelope with the failure message.
    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await.map_err(|e| {
            warn!("Upstream request failed: {}", e);
            ClientError::Network(e.to_string())
        })?;

        let status = response.status();
        debug!(%status, url = %response.url(), "upstream response");

        response.json::<Value>().await.map_err(|e| {
            warn!("Unreadable upstream body ({}): {}", status, e);
            ClientError::Network(format!("unreadable response body ({}): {}", status, e))
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        self.send(self.client.get(self.url(path)).query(query)).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.send(self.client.post(self.url(path)).json(&body)).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value> {
        self.send(self.client.put(self.url(path)).json(&body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value> {
        self.send(self.client.delete(self.url(path))).await
    }
}
