//! HTTP client for the NLI backend

use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

/// Error raised for non-success backend responses
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Backend request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// HTTP client for the backend service
pub struct BackendClient {
    http_client: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(base_url: &str) -> Self {
        let http_client = Client::builder()
            .user_agent("nlidb/0.1.0")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The configured backend base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request against the backend
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .context("Failed to send request to backend")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status { status, body }.into());
        }

        Ok(response)
    }

    /// Make a GET request and deserialize the JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let response = self.get(endpoint).await?;
        let data = response
            .json::<T>()
            .await
            .context("Failed to parse JSON response")?;
        Ok(data)
    }

    /// Make a GET request and return the raw response body
    pub async fn get_bytes(&self, endpoint: &str) -> Result<Vec<u8>> {
        let response = self.get(endpoint).await?;
        let bytes = response
            .bytes()
            .await
            .context("Failed to read response body")?;
        Ok(bytes.to_vec())
    }
}
