//! Granule classification
//!
//! Each granule lands in exactly one bucket, or is dropped. The rules are
//! tried in [`CLASSIFICATION_ORDER`] and the first one that applies wins:
//!
//! 1. [`Rule::CatalogNative`] - a link to a catalog-native item, honored only
//!    when the request asks for the native mode
//! 2. [`Rule::MultiAsset`] - more than one data-asset link sharing a product id
//! 3. [`Rule::SingleAsset`] - one direct-access (or overridden relation) link

use super::naming::{asset_name, basename, common_product_id};
use crate::config::ClassificationConfig;
use crate::domain::{AssetMap, DiscoveryRequest, FileObject, Granule, Link, PassThrough};

/// One classification rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    CatalogNative,
    MultiAsset,
    SingleAsset,
}

/// Priority order of the rules
pub const CLASSIFICATION_ORDER: [Rule; 3] = [Rule::CatalogNative, Rule::MultiAsset, Rule::SingleAsset];

/// Bucket a granule was classified into
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    CatalogNative(Granule),
    MultiAsset(FileObject),
    SingleAsset(FileObject),
}

/// Request-derived inputs shared by every granule of a page
#[derive(Debug, Clone)]
pub struct ClassificationContext {
    pub collection: String,
    pub mode: Option<String>,
    pub link_rel: Option<String>,
    pub data_files: Vec<String>,
    pub pass_through: PassThrough,
}

impl ClassificationContext {
    /// Build the context from a discovery request
    pub fn from_request(request: &DiscoveryRequest) -> Self {
        Self {
            collection: request.collection.clone(),
            mode: request.mode.clone(),
            link_rel: request.link_rel.clone(),
            data_files: request.data_file.clone(),
            pass_through: request.pass_through(),
        }
    }

    fn new_file_object(&self, granule: &Granule) -> FileObject {
        FileObject::new(
            self.collection.clone(),
            granule.id.clone(),
            self.pass_through.clone(),
        )
    }
}

/// Buckets accumulated over one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedPage {
    pub catalog_native: Vec<Granule>,
    pub multi_asset: Vec<FileObject>,
    pub single_asset: Vec<FileObject>,
    pub dropped: usize,
}

/// Assigns granules to catalog-native, multi-asset, or single-asset buckets
#[derive(Debug, Clone)]
pub struct GranuleClassifier {
    markers: ClassificationConfig,
}

impl GranuleClassifier {
    /// Create a classifier with the given link markers
    pub fn new(markers: ClassificationConfig) -> Self {
        Self { markers }
    }

    /// Classify one granule; `None` means it has no usable asset link
    pub fn classify(&self, granule: &Granule, context: &ClassificationContext) -> Option<Classification> {
        CLASSIFICATION_ORDER
            .iter()
            .find_map(|rule| self.apply(*rule, granule, context))
    }

    /// Apply a single rule in isolation
    pub fn apply(
        &self,
        rule: Rule,
        granule: &Granule,
        context: &ClassificationContext,
    ) -> Option<Classification> {
        match rule {
            Rule::CatalogNative => self.catalog_native(granule, context),
            Rule::MultiAsset => self.multi_asset(granule, context),
            Rule::SingleAsset => self.single_asset(granule, context),
        }
    }

    /// Classify every granule of a page into separate buckets
    pub fn classify_page(&self, granules: &[Granule], context: &ClassificationContext) -> ClassifiedPage {
        let mut page = ClassifiedPage::default();

        for granule in granules {
            match self.classify(granule, context) {
                Some(Classification::CatalogNative(g)) => page.catalog_native.push(g),
                Some(Classification::MultiAsset(obj)) => page.multi_asset.push(obj),
                Some(Classification::SingleAsset(obj)) => page.single_asset.push(obj),
                None => {
                    crate::log_granule_dropped!(granule.id, "no asset link");
                    page.dropped += 1;
                }
            }
        }

        tracing::debug!(
            catalog_native = page.catalog_native.len(),
            multi_asset = page.multi_asset.len(),
            single_asset = page.single_asset.len(),
            dropped = page.dropped,
            "Classified page"
        );

        page
    }

    fn is_native_item(&self, link: &Link) -> bool {
        link.href.starts_with(&self.markers.native_item_scheme)
            && link.href.ends_with(&self.markers.native_item_suffix)
    }

    fn catalog_native(&self, granule: &Granule, context: &ClassificationContext) -> Option<Classification> {
        if context.mode.as_deref() != Some(self.markers.native_mode.as_str()) {
            return None;
        }
        granule
            .links
            .iter()
            .any(|link| self.is_native_item(link))
            .then(|| Classification::CatalogNative(granule.clone()))
    }

    fn multi_asset(&self, granule: &Granule, context: &ClassificationContext) -> Option<Classification> {
        let assets: Vec<&Link> = granule
            .links
            .iter()
            .filter(|link| link.rel.ends_with(&self.markers.data_rel_suffix))
            .collect();
        if assets.len() < 2 {
            return None;
        }

        let product_id = common_product_id(assets.iter().map(|link| basename(&link.href)))?;

        let mut asset_map = AssetMap::new();
        let mut primary = None;
        for link in &assets {
            let name = asset_name(&link.href, &product_id);
            if primary.is_none() && context.data_files.contains(&name) {
                primary = Some(link.href.clone());
            }
            asset_map.insert(name, link.href.clone());
        }
        let remote_fileurl = primary.unwrap_or_else(|| assets[0].href.clone());

        let obj = context
            .new_file_object(granule)
            .with_remote_fileurl(remote_fileurl)
            .with_product(product_id, asset_map);
        Some(Classification::MultiAsset(obj))
    }

    fn single_asset(&self, granule: &Granule, context: &ClassificationContext) -> Option<Classification> {
        let link = granule.links.iter().find(|link| {
            link.rel == self.markers.direct_access_rel
                || context.link_rel.as_deref() == Some(link.rel.as_str())
        })?;

        let obj = context
            .new_file_object(granule)
            .with_remote_fileurl(link.href.clone());
        Some(Classification::SingleAsset(obj))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GranuleId;

    const DATA_REL: &str = "http://esipfed.org/ns/fedsearch/1.1/data#";
    const S3_REL: &str = "http://esipfed.org/ns/fedsearch/1.1/s3#";
    const META_REL: &str = "http://esipfed.org/ns/fedsearch/1.1/metadata#";

    fn classifier() -> GranuleClassifier {
        GranuleClassifier::new(ClassificationConfig::default())
    }

    fn granule(id: &str, links: &[(&str, &str)]) -> Granule {
        Granule::new(
            GranuleId::new(id).unwrap(),
            links.iter().map(|(rel, href)| Link::new(*rel, *href)).collect(),
        )
    }

    fn context(mode: Option<&str>, data_files: &[&str]) -> ClassificationContext {
        let mut request = DiscoveryRequest::new("AFRISAR_DLR", "1");
        request.mode = mode.map(str::to_string);
        request.data_file = data_files.iter().map(|s| s.to_string()).collect();
        ClassificationContext::from_request(&request)
    }

    #[test]
    fn test_multi_asset_granule() {
        let g = granule(
            "G1",
            &[
                (DATA_REL, "s3://bucket/PRODUCT1_HH.tif"),
                (DATA_REL, "s3://bucket/PRODUCT1_HV.tif"),
            ],
        );

        let Some(Classification::MultiAsset(obj)) = classifier().classify(&g, &context(None, &[])) else {
            panic!("expected multi-asset classification");
        };

        assert_eq!(obj.product_id.as_ref().unwrap().as_str(), "PRODUCT1");
        assert_eq!(
            obj.assets.keys().collect::<Vec<_>>(),
            vec!["HH.tif", "HV.tif"]
        );
        assert_eq!(obj.remote_fileurl, "s3://bucket/PRODUCT1_HH.tif");
    }

    #[test]
    fn test_multi_asset_primary_follows_hint() {
        let g = granule(
            "G1",
            &[
                (DATA_REL, "s3://bucket/uavsar_kz_001.vrt"),
                (DATA_REL, "s3://bucket/uavsar_kz_001.hdr"),
                (DATA_REL, "s3://bucket/uavsar_kz_001.bin"),
            ],
        );

        let Some(Classification::MultiAsset(obj)) =
            classifier().classify(&g, &context(None, &["hdr"]))
        else {
            panic!("expected multi-asset classification");
        };

        assert_eq!(obj.remote_fileurl, "s3://bucket/uavsar_kz_001.hdr");
        assert_eq!(
            obj.assets.keys().collect::<Vec<_>>(),
            vec!["bin", "hdr", "vrt"]
        );
    }

    #[test]
    fn test_single_data_link_is_not_multi_asset() {
        let g = granule(
            "G1",
            &[
                (DATA_REL, "https://data.example.com/a.tif"),
                (S3_REL, "s3://bucket/a.tif"),
            ],
        );

        let result = classifier().classify(&g, &context(None, &[]));
        let Some(Classification::SingleAsset(obj)) = result else {
            panic!("expected single-asset classification");
        };
        assert_eq!(obj.remote_fileurl, "s3://bucket/a.tif");
        assert!(obj.assets.is_empty());
        assert!(obj.product_id.is_none());
    }

    #[test]
    fn test_link_rel_override() {
        let g = granule("G1", &[(DATA_REL, "s3://bucket/afrisar_dlr_X_HH.tiff")]);
        let mut ctx = context(None, &[]);
        assert!(classifier().classify(&g, &ctx).is_none());

        ctx.link_rel = Some(DATA_REL.to_string());
        let Some(Classification::SingleAsset(obj)) = classifier().classify(&g, &ctx) else {
            panic!("expected single-asset classification");
        };
        assert_eq!(obj.remote_fileurl, "s3://bucket/afrisar_dlr_X_HH.tiff");
    }

    #[test]
    fn test_catalog_native_requires_mode() {
        let g = granule(
            "G1",
            &[
                (META_REL, "https://bucket.example.com/item/stac.json"),
                (S3_REL, "s3://bucket/a.tif"),
            ],
        );

        let native = classifier().classify(&g, &context(Some("stac"), &[]));
        assert_eq!(native, Some(Classification::CatalogNative(g.clone())));

        let other = classifier().classify(&g, &context(Some("cmr"), &[]));
        assert!(matches!(other, Some(Classification::SingleAsset(_))));
    }

    #[test]
    fn test_catalog_native_beats_multi_asset() {
        let g = granule(
            "G1",
            &[
                (DATA_REL, "s3://bucket/P1_HH.tif"),
                (DATA_REL, "s3://bucket/P1_HV.tif"),
                (META_REL, "https://bucket.example.com/P1/stac.json"),
            ],
        );

        assert!(matches!(
            classifier().classify(&g, &context(Some("stac"), &[])),
            Some(Classification::CatalogNative(_))
        ));
        assert!(matches!(
            classifier().classify(&g, &context(None, &[])),
            Some(Classification::MultiAsset(_))
        ));
    }

    #[test]
    fn test_insecure_native_link_ignored() {
        let g = granule("G1", &[(META_REL, "http://bucket.example.com/stac.json")]);
        assert!(classifier()
            .apply(Rule::CatalogNative, &g, &context(Some("stac"), &[]))
            .is_none());
    }

    #[test]
    fn test_classify_page_buckets_and_drops() {
        let granules = vec![
            granule("G1", &[(S3_REL, "s3://bucket/a.tif")]),
            granule(
                "G2",
                &[
                    (DATA_REL, "s3://bucket/P2_a.tif"),
                    (DATA_REL, "s3://bucket/P2_b.tif"),
                ],
            ),
            granule("G3", &[(META_REL, "https://x.example.com/metadata.xml")]),
            granule("G4", &[(META_REL, "https://x.example.com/G4/stac.json")]),
            granule("G5", &[]),
        ];

        let page = classifier().classify_page(&granules, &context(Some("stac"), &[]));
        assert_eq!(page.single_asset.len(), 1);
        assert_eq!(page.multi_asset.len(), 1);
        assert_eq!(page.catalog_native.len(), 1);
        assert_eq!(page.dropped, 2);
        assert_eq!(
            page.single_asset.len()
                + page.multi_asset.len()
                + page.catalog_native.len()
                + page.dropped,
            granules.len()
        );
    }

    #[test]
    fn test_pass_through_copied() {
        let mut request = DiscoveryRequest::new("C", "1");
        request.asset_name = Some("data".to_string());
        request.reverse_coords = Some(true);
        let ctx = ClassificationContext::from_request(&request);

        let g = granule("G1", &[(S3_REL, "s3://bucket/a.tif")]);
        let Some(Classification::SingleAsset(obj)) = classifier().classify(&g, &ctx) else {
            panic!("expected single-asset classification");
        };
        assert_eq!(obj.collection, "C");
        assert_eq!(obj.granule_id.as_str(), "G1");
        assert_eq!(obj.pass_through, request.pass_through());
    }
}
