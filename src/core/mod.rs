//! Core business logic for granule discovery.
//!
//! # Modules
//!
//! - [`discovery`] - Paging, classification, grouping and response assembly
//!
//! # Discovery Workflow
//!
//! Each invocation performs one step:
//!
//! 1. **Validate**: Reject malformed requests before touching the catalog
//! 2. **Fetch**: Query one page of granules and read the total hit count
//! 3. **Cursor**: Decide whether another page remains
//! 4. **Classify**: Sort granules into catalog-native, multi-asset and single-asset
//! 5. **Group**: Merge single-asset files that share a product id
//! 6. **Assemble**: Emit objects with the next cursor
//!
//! # Example
//!
//! ```rust,no_run
//! use granule_discovery::config::load_config_or_default;
//! use granule_discovery::core::discovery::DiscoveryEngine;
//! use granule_discovery::domain::DiscoveryRequest;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default("discovery.toml")?;
//! let engine = DiscoveryEngine::from_config(&config)?;
//!
//! let response = engine.step(DiscoveryRequest::new("AFRISAR_DLR", "1")).await?;
//! println!("Objects: {}", response.objects.len());
//! println!("Next page: {:?}", response.next_page());
//! # Ok(())
//! # }
//! ```

pub mod discovery;
