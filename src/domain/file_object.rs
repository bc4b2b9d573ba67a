//! Normalized discovery output
//!
//! A [`FileObject`] is the unit downstream processing consumes one at a time.
//! Catalog-native records skip normalization and travel as
//! [`DiscoveredObject::CatalogNative`].

use super::granule::Granule;
use super::ids::{GranuleId, ProductId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Asset name to URL map
///
/// Ordered by asset name, so iteration and serialization are always sorted.
pub type AssetMap = BTreeMap<String, String>;

/// Request fields copied verbatim onto every emitted file object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassThrough {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_links: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_coords: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_roles: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_media_type: Option<Value>,

    #[serde(default)]
    pub cogify: bool,
}

/// One normalized, independently processable discovery result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileObject {
    /// Collection short name the granule was discovered in
    pub collection: String,

    /// Catalog granule identifier
    pub granule_id: GranuleId,

    /// Same value as `granule_id`, for consumers keyed on `id`
    pub id: GranuleId,

    /// Primary asset URL selected for downstream processing
    pub remote_fileurl: String,

    /// All assets of the object, keyed by asset name
    #[serde(default)]
    pub assets: AssetMap,

    /// Present only for grouped and multi-asset objects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,

    #[serde(flatten)]
    pub pass_through: PassThrough,
}

impl FileObject {
    /// Create an object with no URL or assets selected yet
    pub fn new(collection: impl Into<String>, granule_id: GranuleId, pass_through: PassThrough) -> Self {
        Self {
            collection: collection.into(),
            id: granule_id.clone(),
            granule_id,
            remote_fileurl: String::new(),
            assets: AssetMap::new(),
            product_id: None,
            pass_through,
        }
    }

    /// Set the primary asset URL
    pub fn with_remote_fileurl(mut self, url: impl Into<String>) -> Self {
        self.remote_fileurl = url.into();
        self
    }

    /// Attach a product id and its full asset map
    pub fn with_product(mut self, product_id: ProductId, assets: AssetMap) -> Self {
        self.product_id = Some(product_id);
        self.assets = assets;
        self
    }
}

/// One entry of the response `objects` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiscoveredObject {
    /// Normalized file object
    File(FileObject),

    /// Catalog-native record, emitted verbatim
    CatalogNative(Granule),
}

impl DiscoveredObject {
    /// The file object, if this is not a catalog-native record
    pub fn as_file(&self) -> Option<&FileObject> {
        match self {
            DiscoveredObject::File(file) => Some(file),
            DiscoveredObject::CatalogNative(_) => None,
        }
    }

    /// True for verbatim catalog-native records
    pub fn is_catalog_native(&self) -> bool {
        matches!(self, DiscoveredObject::CatalogNative(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn granule_id() -> GranuleId {
        GranuleId::new("G1-PROV").unwrap()
    }

    #[test]
    fn test_file_object_serializes_pass_through_flat() {
        let pass_through = PassThrough {
            asset_name: Some("data".to_string()),
            reverse_coords: Some(true),
            ..Default::default()
        };
        let obj = FileObject::new("AFRISAR_DLR", granule_id(), pass_through)
            .with_remote_fileurl("s3://bucket/a.tiff");

        let value = serde_json::to_value(&obj).unwrap();
        assert_eq!(value["collection"], "AFRISAR_DLR");
        assert_eq!(value["granule_id"], "G1-PROV");
        assert_eq!(value["id"], "G1-PROV");
        assert_eq!(value["asset_name"], "data");
        assert_eq!(value["reverse_coords"], true);
        assert_eq!(value["cogify"], false);
        assert_eq!(value["assets"], json!({}));
        assert!(value.get("product_id").is_none());
        assert!(value.get("mode").is_none());
    }

    #[test]
    fn test_assets_serialize_sorted() {
        let mut assets = AssetMap::new();
        assets.insert("prj".to_string(), "s3://b/x_prj".to_string());
        assets.insert("HH.tiff".to_string(), "s3://b/x_HH.tiff".to_string());
        assets.insert("dbf".to_string(), "s3://b/x.dbf".to_string());

        let obj = FileObject::new("C", granule_id(), PassThrough::default())
            .with_product(ProductId::new("x").unwrap(), assets);
        let text = serde_json::to_string(&obj).unwrap();

        let hh = text.find("\"HH.tiff\"").unwrap();
        let dbf = text.find("\"dbf\"").unwrap();
        let prj = text.find("\"prj\"").unwrap();
        assert!(hh < dbf && dbf < prj);
    }

    #[test]
    fn test_discovered_object_untagged() {
        let native: DiscoveredObject = serde_json::from_value(json!({
            "id": "G2-PROV",
            "links": [{"rel": "self", "href": "https://x/stac.json"}]
        }))
        .unwrap();
        assert!(native.is_catalog_native());
        assert!(native.as_file().is_none());

        let obj = FileObject::new("C", granule_id(), PassThrough::default())
            .with_remote_fileurl("s3://b/a.tif");
        let file: DiscoveredObject =
            serde_json::from_value(serde_json::to_value(&obj).unwrap()).unwrap();
        assert_eq!(file.as_file(), Some(&obj));
    }
}
