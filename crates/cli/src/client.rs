//! HTTP client for the analysis service

use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

/// API client for the analysis service
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid API URL")?;

        Ok(Self { client, base_url })
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<(StatusCode, T)> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        read_body(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(StatusCode, T)> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        read_body(response).await
    }
}

/// Decode the body even on error statuses; the service answers 429 and 503
/// with the same envelope as success.
async fn read_body<T: DeserializeOwned>(response: Response) -> Result<(StatusCode, T)> {
    let status = response.status();
    let body = response.text().await.context("Failed to read response")?;

    match serde_json::from_str(&body) {
        Ok(value) => Ok((status, value)),
        Err(e) if status.is_success() => Err(e).context("Failed to parse response"),
        Err(_) => anyhow::bail!("API error ({}): {}", status, body),
    }
}
