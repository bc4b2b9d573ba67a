//! Result type alias for granule discovery

use super::errors::DiscoveryError;

/// Result type alias for discovery operations
///
/// # Examples
///
/// ```
/// use granule_discovery::domain::result::Result;
/// use granule_discovery::domain::errors::DiscoveryError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(DiscoveryError::InvalidRequest("collection is required".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, DiscoveryError>;
