//! Raw catalog records
//!
//! A [`Granule`] is one entry of the catalog's search feed. Fields this crate
//! does not interpret are kept in `extra` so a record can be re-emitted
//! verbatim.

use super::ids::GranuleId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One relation edge attached to a granule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Relation tag, e.g. `http://esipfed.org/ns/fedsearch/1.1/data#`
    #[serde(default)]
    pub rel: String,

    /// Absolute URL, usually an object-storage URL
    pub href: String,

    /// Remaining link attributes (type, title, hreflang, inherited, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Link {
    /// Create a link with no extra attributes
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            extra: Map::new(),
        }
    }
}

/// One raw catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Granule {
    /// Catalog-assigned identifier
    pub id: GranuleId,

    /// Ordered access links
    #[serde(default)]
    pub links: Vec<Link>,

    /// Everything else the catalog returned for this record
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Granule {
    /// Create a granule with the given links and no extra fields
    pub fn new(id: GranuleId, links: Vec<Link>) -> Self {
        Self {
            id,
            links,
            extra: Map::new(),
        }
    }
}
