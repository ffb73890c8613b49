//! REST client for the backend entity collections.
//!
//! Every call sends at most a JSON body with `Content-Type:
//! application/json`; no auth header is attached and no timeout is set.

use async_trait::async_trait;
use awards_core::gateway::{EntityGateway, GatewayError};
use awards_core::record::Record;
use reqwest::Url;

/// Default backend base URL for local development.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5248";

/// HTTP gateway to a single backend instance.
#[derive(Debug, Clone)]
pub struct RestGateway {
    client: reqwest::Client,
    base_url: String,
}

impl RestGateway {
    /// Create a gateway for the backend at `base_url`, e.g.
    /// `http://localhost:5248`. A trailing slash is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a gateway reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/api/{endpoint}`
    pub fn collection_url(&self, endpoint: &str) -> Result<Url, GatewayError> {
        self.url_for(&[endpoint])
    }

    /// `{base}/api/{endpoint}/{id}`
    pub fn item_url(&self, endpoint: &str, id: &str) -> Result<Url, GatewayError> {
        self.url_for(&[endpoint, id])
    }

    // ---- private helpers ----

    /// Append `api` and `segments` to the base URL path. Each segment is
    /// percent-encoded, so `/`, `?` and `#` stay inside it.
    fn url_for(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| GatewayError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| GatewayError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Self::ensure_success(response).await
    }

    /// Pass a 2xx response through; turn anything else into
    /// [`GatewayError::Status`] carrying the body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl EntityGateway for RestGateway {
    async fn list(&self, endpoint: &str) -> Result<Vec<Record>, GatewayError> {
        let url = self.collection_url(endpoint)?;
        tracing::debug!(%url, "GET collection");

        let response = Self::send(self.client.get(url)).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn create(&self, endpoint: &str, record: &Record) -> Result<(), GatewayError> {
        let url = self.collection_url(endpoint)?;
        tracing::debug!(%url, "POST record");

        Self::send(self.client.post(url).json(record)).await?;
        Ok(())
    }

    async fn update(&self, endpoint: &str, id: &str, record: &Record) -> Result<(), GatewayError> {
        let url = self.item_url(endpoint, id)?;
        tracing::debug!(%url, "PUT record");

        Self::send(self.client.put(url).json(record)).await?;
        Ok(())
    }

    async fn delete(&self, endpoint: &str, id: &str) -> Result<(), GatewayError> {
        let url = self.item_url(endpoint, id)?;
        tracing::debug!(%url, "DELETE record");

        Self::send(self.client.delete(url)).await?;
        Ok(())
    }
}
