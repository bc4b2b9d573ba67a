//! Resumable discovery step
//!
//! [`DiscoveryEngine::step`] turns one cursor-bearing request into one
//! cursor-bearing response. It holds no state between calls and performs no
//! side effects besides the read-only catalog fetch, so re-invoking with the
//! same request is always safe. The caller loops while the response carries
//! a cursor.

use super::assemble::{assemble, AssemblyInput};
use super::classify::{ClassificationContext, GranuleClassifier};
use super::cursor::PageCursor;
use super::group::AssetGrouper;
use crate::adapters::catalog::{CatalogSearch, CmrClient, SearchQuery};
use crate::config::{ClassificationConfig, DiscoveryConfig};
use crate::domain::{DiscoveryRequest, DiscoveryResponse, Result};
use serde_json::Value;
use std::sync::Arc;

/// Catalog discovery and granule grouping engine
pub struct DiscoveryEngine {
    catalog: Arc<dyn CatalogSearch>,
    classifier: GranuleClassifier,
}

impl DiscoveryEngine {
    /// Create an engine over any catalog implementation
    pub fn new(catalog: Arc<dyn CatalogSearch>, classification: ClassificationConfig) -> Self {
        Self {
            catalog,
            classifier: GranuleClassifier::new(classification),
        }
    }

    /// Create an engine backed by the CMR client
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use granule_discovery::config::DiscoveryConfig;
    /// use granule_discovery::core::discovery::DiscoveryEngine;
    /// use granule_discovery::domain::DiscoveryRequest;
    ///
    /// # async fn example() -> granule_discovery::domain::Result<()> {
    /// let engine = DiscoveryEngine::from_config(&DiscoveryConfig::default())?;
    ///
    /// let mut next = Some(DiscoveryRequest::new("AFRISAR_DLR", "1"));
    /// while let Some(request) = next {
    ///     let response = engine.step(request).await?;
    ///     println!("{} objects", response.objects.len());
    ///     next = response.next_request();
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_config(config: &DiscoveryConfig) -> Result<Self> {
        let client = CmrClient::new(&config.catalog)?;
        Ok(Self::new(Arc::new(client), config.classification.clone()))
    }

    /// Run one discovery step
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` before any catalog call if the request is invalid
    /// - `Catalog` errors from the page fetch; nothing is emitted in that case
    pub async fn step(&self, request: DiscoveryRequest) -> Result<DiscoveryResponse> {
        request.validate()?;
        let pattern = request.product_pattern()?;

        let (temporal_start, temporal_end) = request.temporal_range();
        let query = SearchQuery {
            short_name: request.collection.clone(),
            version: request.version.clone(),
            temporal_start: temporal_start.to_string(),
            temporal_end: temporal_end.to_string(),
            page_num: request.page(),
            page_size: request.page_size(),
            base_url: request.cmr_api_url.clone(),
        };

        let page = self.catalog.search(&query).await?;
        crate::log_page_fetched!(
            request.collection,
            query.page_num,
            page.hits,
            page.granules.len()
        );

        let cursor = PageCursor::new(query.page_num, query.page_size, page.hits);
        let next_page = cursor.next(page.granules.len());
        crate::log_cursor_decision!(cursor, next_page);

        let context = ClassificationContext::from_request(&request);
        let classified = self.classifier.classify_page(&page.granules, &context);

        let grouped = match pattern {
            Some(pattern) => AssetGrouper::new(pattern, request.data_file.clone())?
                .group(&classified.single_asset)?,
            None => classified.single_asset,
        };

        let response = assemble(
            request,
            next_page,
            AssemblyInput {
                grouped,
                multi_asset: classified.multi_asset,
                catalog_native: classified.catalog_native,
            },
        );

        tracing::info!(
            objects = response.objects.len(),
            next_page = ?response.next_page(),
            "Discovery step complete"
        );

        Ok(response)
    }

    /// Run one discovery step on a raw JSON payload
    ///
    /// Decodes and validates the request at the boundary, then serializes
    /// the response back to JSON. A previous response is accepted as the
    /// payload, so an orchestrator can loop on the JSON alone.
    pub async fn step_json(&self, payload: Value) -> Result<Value> {
        let request = DiscoveryRequest::from_value(payload)?;
        let response = self.step(request).await?;
        Ok(serde_json::to_value(&response)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::SearchPage;
    use crate::domain::{CatalogError, DiscoveryError, Granule, GranuleId, Link};
    use async_trait::async_trait;
    use std::sync::Mutex;

    const DATA_REL: &str = "http://esipfed.org/ns/fedsearch/1.1/data#";
    const S3_REL: &str = "http://esipfed.org/ns/fedsearch/1.1/s3#";

    /// Serves a fixed list of granules page by page
    struct FakeCatalog {
        granules: Vec<Granule>,
        queries: Mutex<Vec<SearchQuery>>,
    }

    impl FakeCatalog {
        fn new(granules: Vec<Granule>) -> Self {
            Self {
                granules,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CatalogSearch for FakeCatalog {
        async fn search(&self, query: &SearchQuery) -> Result<SearchPage> {
            self.queries.lock().unwrap().push(query.clone());
            let start = ((query.page_num - 1) * query.page_size) as usize;
            let granules = self
                .granules
                .iter()
                .skip(start)
                .take(query.page_size as usize)
                .cloned()
                .collect();
            Ok(SearchPage {
                granules,
                hits: self.granules.len() as u64,
            })
        }

        fn base_url(&self) -> &str {
            "https://catalog.test"
        }
    }

    struct FailingCatalog;

    #[async_trait]
    impl CatalogSearch for FailingCatalog {
        async fn search(&self, _query: &SearchQuery) -> Result<SearchPage> {
            Err(CatalogError::Unavailable {
                status: 500,
                body: "internal error".to_string(),
            }
            .into())
        }

        fn base_url(&self) -> &str {
            "https://catalog.test"
        }
    }

    fn single(id: &str, href: &str) -> Granule {
        Granule::new(GranuleId::new(id).unwrap(), vec![Link::new(S3_REL, href)])
    }

    fn engine(catalog: Arc<dyn CatalogSearch>) -> DiscoveryEngine {
        DiscoveryEngine::new(catalog, ClassificationConfig::default())
    }

    #[tokio::test]
    async fn test_step_pages_until_exhausted() {
        let granules: Vec<Granule> = (0..5)
            .map(|i| single(&format!("G{i}"), &format!("s3://bucket/file{i}.tif")))
            .collect();
        let catalog = Arc::new(FakeCatalog::new(granules));
        let engine = engine(catalog.clone());

        let mut request = DiscoveryRequest::new("C", "1");
        request.limit = Some(2);

        let mut seen = Vec::new();
        let mut next = Some(request);
        while let Some(request) = next {
            let response = engine.step(request).await.unwrap();
            seen.extend(
                response
                    .objects
                    .iter()
                    .filter_map(|o| o.as_file())
                    .map(|f| f.granule_id.to_string()),
            );
            next = response.next_request();
        }

        assert_eq!(seen, vec!["G0", "G1", "G2", "G3", "G4"]);
        let pages: Vec<u64> = catalog
            .queries
            .lock()
            .unwrap()
            .iter()
            .map(|q| q.page_num)
            .collect();
        assert_eq!(pages, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_step_is_repeatable() {
        let granules = vec![
            Granule::new(
                GranuleId::new("G1").unwrap(),
                vec![
                    Link::new(DATA_REL, "s3://bucket/P1_HH.tif"),
                    Link::new(DATA_REL, "s3://bucket/P1_HV.tif"),
                ],
            ),
            single("G2", "s3://bucket/afrisar_dlr_X_HH.tiff"),
        ];
        let engine = engine(Arc::new(FakeCatalog::new(granules)));

        let mut request = DiscoveryRequest::new("C", "1");
        request.data_file = vec!["HH.tiff".to_string()];
        request.data_file_regex = Some("afrisar_dlr_[^_]+".to_string());

        let first = engine.step(request.clone()).await.unwrap();
        let second = engine.step(request).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.objects.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_request_fails_before_fetch() {
        let catalog = Arc::new(FakeCatalog::new(Vec::new()));
        let engine = engine(catalog.clone());

        let mut request = DiscoveryRequest::new("C", "1");
        request.data_file_regex = Some("([".to_string());

        let err = engine.step(request).await.unwrap_err();
        assert!(matches!(err, DiscoveryError::InvalidRequest(_)));
        assert!(catalog.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_failure_propagates() {
        let engine = engine(Arc::new(FailingCatalog));
        let err = engine.step(DiscoveryRequest::new("C", "1")).await.unwrap_err();
        assert!(matches!(
            err,
            DiscoveryError::Catalog(CatalogError::Unavailable { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_step_json_rejects_missing_collection() {
        let engine = engine(Arc::new(FakeCatalog::new(Vec::new())));
        let err = engine
            .step_json(serde_json::json!({"version": "1"}))
            .await
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_step_json_accepts_previous_response() {
        let granules: Vec<Granule> = (0..3)
            .map(|i| single(&format!("G{i}"), &format!("s3://bucket/file{i}.tif")))
            .collect();
        let engine = engine(Arc::new(FakeCatalog::new(granules)));

        let mut payload = serde_json::json!({"collection": "C", "version": "1", "limit": 1});
        let mut ids = Vec::new();
        loop {
            let response = engine.step_json(payload).await.unwrap();
            for obj in response["objects"].as_array().unwrap() {
                ids.push(obj["granule_id"].as_str().unwrap().to_string());
            }
            if response.get("start_after").is_none() {
                break;
            }
            payload = response;
        }

        assert_eq!(ids, vec!["G0", "G1", "G2"]);
    }

    #[tokio::test]
    async fn test_invalid_hint_fails_before_fetch() {
        let catalog = Arc::new(FakeCatalog::new(Vec::new()));
        let engine = engine(catalog.clone());

        let mut request = DiscoveryRequest::new("C", "1");
        request.data_file = vec!["([".to_string()];
        request.data_file_regex = Some("afrisar_dlr_[^_]+".to_string());

        let err = engine.step(request).await.unwrap_err();
        assert!(matches!(err, DiscoveryError::InvalidRequest(_)));
        assert!(catalog.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_request_base_url_override_reaches_catalog() {
        let catalog = Arc::new(FakeCatalog::new(Vec::new()));
        let engine = engine(catalog.clone());

        let mut request = DiscoveryRequest::new("C", "1");
        request.cmr_api_url = Some("https://cmr.earthdata.nasa.gov".to_string());
        engine.step(request).await.unwrap();

        let queries = catalog.queries.lock().unwrap();
        assert_eq!(
            queries[0].base_url.as_deref(),
            Some("https://cmr.earthdata.nasa.gov")
        );
    }
}
