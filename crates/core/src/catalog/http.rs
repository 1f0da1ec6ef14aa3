//! Catalog source backed by the published site.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{CatalogDocument, CatalogError, CatalogSource};
use crate::config::HttpCatalogConfig;

/// Fetches `data/posts.json` (or the configured path) over HTTP.
pub struct HttpCatalogSource {
    client: Client,
    url: String,
}

impl HttpCatalogSource {
    /// Create a new HTTP source.
    pub fn new(config: &HttpCatalogConfig) -> Result<Self, CatalogError> {
        if config.base_url.trim().is_empty() {
            return Err(CatalogError::NotConfigured(
                "catalog base URL is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()?;

        let url = format!(
            "{}/{}",
            config.base_url.trim_end_matches('/'),
            config.path.trim_start_matches('/')
        );

        Ok(Self { client, url })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    fn name(&self) -> &str {
        "http"
    }

    fn location(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<CatalogDocument, CatalogError> {
        debug!("Fetching catalog from {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        CatalogDocument::from_json(&body).map_err(|e| CatalogError::ParseError(e.to_string()))
    }
}
