//! Domain error types
//!
//! This module defines the error hierarchy for granule discovery.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main discovery error type
///
/// This is the primary error type used throughout the crate. Every failure
/// is raised to the immediate caller; nothing here is retried internally.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The discovery request was rejected before any catalog call
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Catalog-related errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Catalog-specific errors
///
/// Errors that occur when talking to the metadata catalog. These errors
/// don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog answered with a non-success status
    #[error("Catalog unavailable: {status} - {body}")]
    Unavailable { status: u16, body: String },

    /// The hit-count header is missing or not an integer
    #[error("Malformed hit count: {0}")]
    MalformedHitCount(String),

    /// Failed to reach the catalog at all
    #[error("Failed to connect to catalog: {0}")]
    ConnectionFailed(String),

    /// The response body is not a search feed
    #[error("Invalid response from catalog: {0}")]
    InvalidResponse(String),
}

impl DiscoveryError {
    /// Process exit code the CLI reports for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DiscoveryError::Configuration(_) => 2,
            DiscoveryError::InvalidRequest(_) => 3,
            DiscoveryError::Catalog(_) => 4,
            _ => 5,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for DiscoveryError {
    fn from(err: std::io::Error) -> Self {
        DiscoveryError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for DiscoveryError {
    fn from(err: serde_json::Error) -> Self {
        DiscoveryError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for DiscoveryError {
    fn from(err: toml::de::Error) -> Self {
        DiscoveryError::Configuration(format!("TOML parse error: {err}"))
    }
}
