//! Configuration schema types
//!
//! This module defines the configuration structure for granule discovery.

use serde::{Deserialize, Serialize};

/// Main discovery configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional and falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Catalog connection settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Link-relation markers used by the granule classifier
    #[serde(default)]
    pub classification: ClassificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DiscoveryConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.catalog.validate()?;
        self.classification.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Metadata catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog search service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Response header carrying the total hit count
    #[serde(default = "default_hits_header")]
    pub hits_header: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl CatalogConfig {
    fn validate(&self) -> Result<(), String> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| format!("catalog.base_url '{}' is not a URL: {e}", self.base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err("catalog.base_url must start with http:// or https://".to_string());
        }

        if self.hits_header.trim().is_empty() {
            return Err("catalog.hits_header cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("catalog.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            hits_header: default_hits_header(),
            timeout_seconds: default_timeout_seconds(),
            tls_verify: true,
        }
    }
}

/// Markers the classifier matches link relations and URLs against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Relation tag of a direct-access (single-asset) link
    #[serde(default = "default_direct_access_rel")]
    pub direct_access_rel: String,

    /// Suffix of a data-asset relation tag
    #[serde(default = "default_data_rel_suffix")]
    pub data_rel_suffix: String,

    /// URL prefix of a catalog-native item link
    #[serde(default = "default_native_item_scheme")]
    pub native_item_scheme: String,

    /// Filename suffix of a catalog-native item link
    #[serde(default = "default_native_item_suffix")]
    pub native_item_suffix: String,

    /// Request `mode` that enables catalog-native handling
    #[serde(default = "default_native_mode")]
    pub native_mode: String,
}

impl ClassificationConfig {
    fn validate(&self) -> Result<(), String> {
        let fields = [
            ("direct_access_rel", &self.direct_access_rel),
            ("data_rel_suffix", &self.data_rel_suffix),
            ("native_item_scheme", &self.native_item_scheme),
            ("native_item_suffix", &self.native_item_suffix),
            ("native_mode", &self.native_mode),
        ];
        for (name, value) in fields {
            if value.is_empty() {
                return Err(format!("classification.{name} cannot be empty"));
            }
        }
        Ok(())
    }
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            direct_access_rel: default_direct_access_rel(),
            data_rel_suffix: default_data_rel_suffix(),
            native_item_scheme: default_native_item_scheme(),
            native_item_suffix: default_native_item_suffix(),
            native_mode: default_native_mode(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://cmr.maap-project.org".to_string()
}

fn default_hits_header() -> String {
    "CMR-Hits".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_direct_access_rel() -> String {
    "http://esipfed.org/ns/fedsearch/1.1/s3#".to_string()
}

fn default_data_rel_suffix() -> String {
    "/data#".to_string()
}

fn default_native_item_scheme() -> String {
    "https".to_string()
}

fn default_native_item_suffix() -> String {
    "stac.json".to_string()
}

fn default_native_mode() -> String {
    "stac".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
