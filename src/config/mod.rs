//! Configuration management for granule discovery.
//!
//! TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Configuration files support:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `DISCOVERY_<SECTION>_<KEY>` environment overrides
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`CatalogConfig`] - Catalog base URL, hit-count header, timeout, TLS
//! - [`ClassificationConfig`] - Link-relation markers used by the classifier
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [catalog]
//! base_url = "${CMR_API_URL}"
//! hits_header = "CMR-Hits"
//! timeout_seconds = 30
//!
//! [classification]
//! direct_access_rel = "http://esipfed.org/ns/fedsearch/1.1/s3#"
//! data_rel_suffix = "/data#"
//! native_mode = "stac"
//!
//! [logging]
//! local_enabled = true
//! local_path = "/var/log/granule-discovery"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use granule_discovery::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("discovery.toml")?;
//! println!("Catalog: {}", config.catalog.base_url);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, CatalogConfig, ClassificationConfig, DiscoveryConfig, LoggingConfig,
};
