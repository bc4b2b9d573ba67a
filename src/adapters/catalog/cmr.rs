//! CMR catalog implementation
//!
//! Issues `GET {base}/search/granules.json` against a Common Metadata
//! Repository endpoint and reads the total hit count from a response header.

use super::models::{SearchFeed, SearchPage, SearchQuery};
use super::CatalogSearch;
use crate::config::CatalogConfig;
use crate::domain::{CatalogError, DiscoveryError, Result};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Path of the granule search endpoint below the base URL
const GRANULE_SEARCH_PATH: &str = "search/granules.json";

/// reqwest-backed catalog client
///
/// One request per call, no retries: a failed page is reported to the caller,
/// which re-invokes with the same cursor.
pub struct CmrClient {
    /// Configured base URL of the catalog
    base_url: String,

    /// HTTP client for making requests
    client: Client,

    /// Header carrying the total hit count
    hits_header: String,
}

impl CmrClient {
    /// Create a new client from catalog configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(30)));

        if !config.tls_verify {
            tracing::warn!("TLS certificate verification disabled for catalog requests");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            DiscoveryError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            base_url: config.base_url.clone(),
            client,
            hits_header: config.hits_header.clone(),
        })
    }

    /// Granule search URL for the given base
    fn search_endpoint(base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), GRANULE_SEARCH_PATH)
    }

    /// Read the total hit count from the response headers
    fn parse_hits(&self, headers: &HeaderMap) -> Result<u64> {
        let raw = headers.get(self.hits_header.as_str()).ok_or_else(|| {
            CatalogError::MalformedHitCount(format!("missing {} header", self.hits_header))
        })?;

        let text = raw.to_str().map_err(|e| {
            CatalogError::MalformedHitCount(format!("{} header is not text: {e}", self.hits_header))
        })?;

        let hits = text.trim().parse::<u64>().map_err(|e| {
            CatalogError::MalformedHitCount(format!("'{text}' is not an integer: {e}"))
        })?;

        Ok(hits)
    }
}

#[async_trait]
impl CatalogSearch for CmrClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage> {
        let base_url = query.base_url.as_deref().unwrap_or(&self.base_url);
        let url = Self::search_endpoint(base_url);
        let params = query.params();

        tracing::info!(
            url = %url,
            short_name = %query.short_name,
            version = %query.version,
            page_num = query.page_num,
            page_size = query.page_size,
            "Discovering data from catalog"
        );

        let resp = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| CatalogError::ConnectionFailed(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                body = %body,
                "Got an error from the catalog"
            );
            return Err(CatalogError::Unavailable {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let hits = self.parse_hits(resp.headers())?;

        let feed: SearchFeed = resp
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;
        let granules = feed.into_granules();

        tracing::debug!(hits, returned = granules.len(), "Decoded catalog page");

        Ok(SearchPage { granules, hits })
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
