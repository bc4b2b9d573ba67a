//! Grouping of single-asset granules into products
//!
//! Some collections publish every file of a product as its own granule. The
//! grouper extracts a product id from each URL with the caller's pattern,
//! collects the asset map of each product, and emits one grouped file object
//! per product.

use super::naming::asset_name;
use crate::domain::{AssetMap, DiscoveryError, FileObject, ProductId, Result};
use regex::Regex;
use std::collections::HashMap;

/// Merges single-asset file objects that share a product id
#[derive(Debug, Clone)]
pub struct AssetGrouper {
    pattern: Regex,
    hints: Vec<String>,
}

/// Product a file object was assigned to, and the hint that matched it
#[derive(Debug, Clone, Copy)]
struct Assignment {
    product: usize,
    hint: usize,
}

impl AssetGrouper {
    /// Create a grouper from a product-id pattern and data-file hints
    ///
    /// Hints are regular expressions matched after the product id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if a hint does not compile.
    pub fn new(pattern: Regex, hints: Vec<String>) -> Result<Self> {
        for hint in &hints {
            Regex::new(hint).map_err(|e| {
                DiscoveryError::InvalidRequest(format!("data_file hint '{hint}' does not compile: {e}"))
            })?;
        }
        Ok(Self { pattern, hints })
    }

    /// Product id of a URL: the first match of the pattern
    pub fn product_id(&self, url: &str) -> Option<ProductId> {
        self.pattern
            .find(url)
            .and_then(|m| ProductId::new(m.as_str()).ok())
    }

    /// Membership patterns of one product, one per hint
    ///
    /// A URL belongs to a product when it matches `<product id>.*<hint>`.
    /// Without hints, containing the product id is enough.
    fn member_patterns(&self, product_id: &ProductId) -> Result<Vec<Regex>> {
        let pid = regex::escape(product_id.as_str());
        if self.hints.is_empty() {
            return Ok(vec![Regex::new(&pid).map_err(invalid_pattern)?]);
        }

        self.hints
            .iter()
            .map(|hint| Regex::new(&format!("{pid}.*(?:{hint})")).map_err(invalid_pattern))
            .collect()
    }

    /// Collect `product id -> {asset name: url}` in first-seen order
    fn collect_products(&self, singles: &[FileObject]) -> Vec<(ProductId, AssetMap)> {
        let mut products: Vec<(ProductId, AssetMap)> = Vec::new();
        let mut index: HashMap<ProductId, usize> = HashMap::new();

        for obj in singles {
            let Some(product_id) = self.product_id(&obj.remote_fileurl) else {
                crate::log_granule_dropped!(obj.granule_id, "no matching pattern");
                continue;
            };

            let slot = *index.entry(product_id.clone()).or_insert_with(|| {
                products.push((product_id.clone(), AssetMap::new()));
                products.len() - 1
            });
            products[slot].1.insert(
                asset_name(&obj.remote_fileurl, &product_id),
                obj.remote_fileurl.clone(),
            );
        }

        products
    }

    /// Group single-asset file objects into one object per product
    ///
    /// Each file object is assigned to the last product it matches. The
    /// grouped object is the member matched by the earliest hint (ties broken
    /// by input order) carrying the product's full asset map. Products whose
    /// files match no hint are not emitted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if a membership pattern does not compile.
    pub fn group(&self, singles: &[FileObject]) -> Result<Vec<FileObject>> {
        let products = self.collect_products(singles);
        let mut assignments: Vec<Option<Assignment>> = vec![None; singles.len()];

        for (product, (product_id, _)) in products.iter().enumerate() {
            let patterns = self.member_patterns(product_id)?;
            for (i, obj) in singles.iter().enumerate() {
                let Some(hint) = patterns
                    .iter()
                    .position(|pattern| pattern.is_match(&obj.remote_fileurl))
                else {
                    continue;
                };
                if let Some(previous) = assignments[i] {
                    tracing::warn!(
                        granule_id = %obj.granule_id,
                        previous = %products[previous.product].0,
                        product_id = %product_id,
                        "File matches several products, last match wins"
                    );
                }
                assignments[i] = Some(Assignment { product, hint });
            }
        }

        let mut grouped = Vec::new();
        for (product, (product_id, assets)) in products.iter().enumerate() {
            let representative = assignments
                .iter()
                .enumerate()
                .filter_map(|(i, slot)| match slot {
                    Some(a) if a.product == product => Some((a.hint, i)),
                    _ => None,
                })
                .min();

            let Some((_, i)) = representative else {
                tracing::debug!(product_id = %product_id, "Product has no member matching a data file hint");
                continue;
            };

            tracing::debug!(
                product_id = %product_id,
                assets = assets.len(),
                remote_fileurl = %singles[i].remote_fileurl,
                "Grouped product"
            );
            grouped.push(
                singles[i]
                    .clone()
                    .with_product(product_id.clone(), assets.clone()),
            );
        }

        Ok(grouped)
    }
}

fn invalid_pattern(e: regex::Error) -> DiscoveryError {
    DiscoveryError::InvalidRequest(format!("data_file hint does not compile: {e}"))
}
