//! Catalog search trait definition
//!
//! `CatalogSearch` abstracts the paged granule search so the discovery engine
//! can run against the real catalog or an in-memory stand-in.

use super::models::{SearchPage, SearchQuery};
use crate::domain::Result;
use async_trait::async_trait;

/// Trait for metadata catalog implementations
///
/// # Example
///
/// ```no_run
/// use granule_discovery::adapters::catalog::{CatalogSearch, CmrClient, SearchQuery};
/// use granule_discovery::config::CatalogConfig;
///
/// # async fn example() -> granule_discovery::domain::Result<()> {
/// let client = CmrClient::new(&CatalogConfig::default())?;
/// let page = client
///     .search(&SearchQuery {
///         short_name: "AFRISAR_DLR".to_string(),
///         version: "1".to_string(),
///         temporal_start: "2021-01-01T00:00:00Z".to_string(),
///         temporal_end: "2021-12-31T23:59:59Z".to_string(),
///         page_num: 1,
///         page_size: 100,
///         base_url: None,
///     })
///     .await?;
/// println!("{} of {} granules", page.granules.len(), page.hits);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Fetch one page of granules and the total hit count
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Unavailable` on a non-success status,
    /// `CatalogError::MalformedHitCount` when the hit count cannot be read,
    /// and `CatalogError::InvalidResponse` when the body is not a search feed.
    /// No retry is attempted.
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage>;

    /// Base URL used when a query carries no override
    fn base_url(&self) -> &str;
}
