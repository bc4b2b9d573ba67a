//! Catalog search API models
//!
//! Wire structures of the catalog's JSON search response. They are kept
//! apart from the domain types and only unwrap the `feed.entry` envelope.

use crate::domain::Granule;
use serde::{Deserialize, Serialize};

/// Top-level search response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchFeed {
    pub feed: Feed,
}

/// Atom-style feed wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feed {
    /// Granule records of this page; absent means an empty page
    #[serde(default)]
    pub entry: Vec<Granule>,
}

impl SearchFeed {
    /// Unwrap the page's granules
    pub fn into_granules(self) -> Vec<Granule> {
        self.feed.entry
    }
}

/// Parameters of one paged granule search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Collection short name
    pub short_name: String,

    /// Collection version
    pub version: String,

    /// Temporal range start (RFC 3339)
    pub temporal_start: String,

    /// Temporal range end (RFC 3339)
    pub temporal_end: String,

    /// 1-based page index
    pub page_num: u64,

    /// Page size
    pub page_size: u64,

    /// Base URL to use instead of the client's configured one
    pub base_url: Option<String>,
}

impl SearchQuery {
    /// Query parameters in the order the catalog documents them
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("short_name", self.short_name.clone()),
            ("version", self.version.clone()),
            (
                "temporal[]",
                format!("{},{}", self.temporal_start, self.temporal_end),
            ),
            ("page_size", self.page_size.to_string()),
            ("page_num", self.page_num.to_string()),
        ]
    }
}

/// One fetched page plus the total hit count for the query
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub granules: Vec<Granule>,
    pub hits: u64,
}
