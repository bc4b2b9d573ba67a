//! Catalog discovery and granule grouping
//!
//! One invocation fetches one page from the catalog, classifies each granule,
//! groups single-asset files into products, and emits a response carrying
//! the next page cursor.
//!
//! # Modules
//!
//! - [`cursor`] - Next-page decision
//! - [`classify`] - Granule classification rules
//! - [`naming`] - Product id and asset name derivation from URLs
//! - [`group`] - Product grouping of single-asset files
//! - [`assemble`] - Response assembly in output order
//! - [`engine`] - The resumable step tying it together

pub mod assemble;
pub mod classify;
pub mod cursor;
pub mod engine;
pub mod group;
pub mod naming;

pub use assemble::{assemble, AssemblyInput};
pub use classify::{Classification, ClassificationContext, ClassifiedPage, GranuleClassifier, Rule};
pub use cursor::{next_cursor, PageCursor};
pub use engine::DiscoveryEngine;
pub use group::AssetGrouper;
