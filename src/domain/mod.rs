//! Domain models and types for granule discovery.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`GranuleId`], [`ProductId`])
//! - **Catalog records** ([`Granule`], [`Link`])
//! - **Normalized output** ([`FileObject`], [`DiscoveredObject`])
//! - **Payloads** ([`DiscoveryRequest`], [`DiscoveryResponse`])
//! - **Error types** ([`DiscoveryError`], [`CatalogError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, DiscoveryError>`]:
//!
//! ```rust
//! use granule_discovery::domain::{DiscoveryRequest, Result};
//!
//! fn example() -> Result<()> {
//!     let request = DiscoveryRequest::from_json(r#"{"collection": "C", "version": "1"}"#)?;
//!     assert_eq!(request.page(), 1);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod file_object;
pub mod granule;
pub mod ids;
pub mod request;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{CatalogError, DiscoveryError};
pub use file_object::{AssetMap, DiscoveredObject, FileObject, PassThrough};
pub use granule::{Granule, Link};
pub use ids::{GranuleId, ProductId};
pub use request::{DiscoveryRequest, DiscoveryResponse};
pub use result::Result;
