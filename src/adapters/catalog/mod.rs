//! Metadata catalog adapter
//!
//! This module provides the catalog search abstraction, its CMR
//! implementation, and the search API models.

pub mod cmr;
pub mod models;
pub mod search;

pub use cmr::CmrClient;
pub use models::{SearchFeed, SearchPage, SearchQuery};
pub use search::CatalogSearch;
