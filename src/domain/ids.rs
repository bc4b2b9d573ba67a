//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers the discovery engine passes around,
//! so a granule id can never be handed where a product id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog-assigned granule identifier
///
/// Opaque to this crate; only required to be non-empty.
///
/// # Examples
///
/// ```
/// use granule_discovery::domain::ids::GranuleId;
/// use std::str::FromStr;
///
/// let id = GranuleId::from_str("G1200354094-NASA_MAAP").unwrap();
/// assert_eq!(id.as_str(), "G1200354094-NASA_MAAP");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GranuleId(String);

impl GranuleId {
    /// Creates a new GranuleId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Granule ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the granule ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for GranuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GranuleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for GranuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Product identifier shared by every asset of one logical product
///
/// Derived from asset filenames, either as the common basename prefix of a
/// multi-asset granule or as the first match of the grouping pattern.
///
/// # Examples
///
/// ```
/// use granule_discovery::domain::ids::ProductId;
///
/// let id = ProductId::new("afrisar_dlr_X").unwrap();
/// assert_eq!(id.to_string(), "afrisar_dlr_X");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new ProductId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.is_empty() {
            return Err("Product ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the product ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
