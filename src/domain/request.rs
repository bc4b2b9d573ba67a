//! Discovery request and response payloads
//!
//! The request is the only state the engine sees: the external orchestrator
//! round-trips the page cursor through `start_after`, so a response payload
//! is accepted back as the next request. Unknown fields are rejected at the
//! boundary instead of being ignored deep inside classification.

use super::errors::DiscoveryError;
use super::file_object::{DiscoveredObject, PassThrough};
use super::result::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Default temporal range, effectively unbounded
pub const DEFAULT_TEMPORAL: [&str; 2] = ["1000-01-01T00:00:00Z", "3000-01-01T23:59:59Z"];

/// First page index
pub const DEFAULT_PAGE: u64 = 1;

/// Default page size
pub const DEFAULT_LIMIT: u64 = 100;

/// Response-only fields dropped when a response is fed back as a request
const RESPONSE_ONLY_FIELDS: [&str; 1] = ["objects"];

/// Discovery request
///
/// # Examples
///
/// ```
/// use granule_discovery::domain::DiscoveryRequest;
/// use serde_json::json;
///
/// let request = DiscoveryRequest::from_value(json!({
///     "collection": "AFRISAR_DLR",
///     "version": "1",
///     "data_file": "HH.tiff",
/// })).unwrap();
///
/// assert_eq!(request.page(), 1);
/// assert_eq!(request.page_size(), 100);
/// assert_eq!(request.data_file, vec!["HH.tiff".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoveryRequest {
    /// Collection short name
    pub collection: String,

    /// Collection version
    pub version: String,

    /// Start and end of the temporal range (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal: Option<[String; 2]>,

    /// 1-based page to fetch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_after: Option<u64>,

    /// Page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    /// Processing mode; the configured native mode enables catalog-native handling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Extra relation tag accepted for single-asset links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_rel: Option<String>,

    /// Hints for primary-asset and group-member selection
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub data_file: Vec<String>,

    /// Product-id extraction pattern; absence disables grouping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file_regex: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_roles: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_media_type: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_coords: Option<bool>,

    #[serde(default)]
    pub cogify: bool,

    /// Per-request catalog base URL override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmr_api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_links: Option<Value>,

    /// Orchestrator routing fields, echoed only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_messages: Option<Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(hint)) => vec![hint],
        Some(OneOrMany::Many(hints)) => hints,
    })
}

impl DiscoveryRequest {
    /// Create a minimal request for one collection version
    pub fn new(collection: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            version: version.into(),
            temporal: None,
            start_after: None,
            limit: None,
            mode: None,
            link_rel: None,
            data_file: Vec::new(),
            data_file_regex: None,
            asset_name: None,
            asset_roles: None,
            asset_media_type: None,
            reverse_coords: None,
            cogify: false,
            cmr_api_url: None,
            test_links: None,
            discovery: None,
            queue_messages: None,
        }
    }

    /// Decode and validate a request payload
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::InvalidRequest`] for missing required fields,
    /// unknown fields, or values that fail [`DiscoveryRequest::validate`].
    /// The response-only `objects` field is ignored.
    pub fn from_value(mut value: Value) -> Result<Self> {
        if let Some(fields) = value.as_object_mut() {
            for field in RESPONSE_ONLY_FIELDS {
                fields.remove(field);
            }
        }

        let request: Self = serde_json::from_value(value)
            .map_err(|e| DiscoveryError::InvalidRequest(e.to_string()))?;
        request.validate()?;
        Ok(request)
    }

    /// Decode and validate a request from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| DiscoveryError::InvalidRequest(format!("Malformed JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Validates field values
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::InvalidRequest`] describing the first invalid field
    pub fn validate(&self) -> Result<()> {
        if self.collection.trim().is_empty() {
            return Err(invalid("collection cannot be empty"));
        }
        if self.version.trim().is_empty() {
            return Err(invalid("version cannot be empty"));
        }
        if self.start_after == Some(0) {
            return Err(invalid("start_after is 1-based and must be > 0"));
        }
        if self.limit == Some(0) {
            return Err(invalid("limit must be > 0"));
        }

        if let Some([start, end]) = &self.temporal {
            let start_at = parse_timestamp(start)
                .ok_or_else(|| invalid(format!("temporal start '{start}' is not an ISO 8601 timestamp")))?;
            let end_at = parse_timestamp(end)
                .ok_or_else(|| invalid(format!("temporal end '{end}' is not an ISO 8601 timestamp")))?;
            if start_at > end_at {
                return Err(invalid(format!(
                    "temporal start '{start}' is after end '{end}'"
                )));
            }
        }

        if let Some(pattern) = &self.data_file_regex {
            Regex::new(pattern)
                .map_err(|e| invalid(format!("data_file_regex does not compile: {e}")))?;

            // Hints are patterns once grouping is on
            for hint in &self.data_file {
                Regex::new(hint)
                    .map_err(|e| invalid(format!("data_file hint '{hint}' does not compile: {e}")))?;
            }
        }

        if let Some(url) = &self.cmr_api_url {
            let parsed = url::Url::parse(url)
                .map_err(|e| invalid(format!("cmr_api_url '{url}' is not a URL: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(invalid("cmr_api_url must use http or https"));
            }
        }

        Ok(())
    }

    /// Page to fetch, defaulting to the first
    pub fn page(&self) -> u64 {
        self.start_after.unwrap_or(DEFAULT_PAGE)
    }

    /// Page size, defaulting to [`DEFAULT_LIMIT`]
    pub fn page_size(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// Temporal bounds, defaulting to [`DEFAULT_TEMPORAL`]
    pub fn temporal_range(&self) -> (&str, &str) {
        match &self.temporal {
            Some([start, end]) => (start.as_str(), end.as_str()),
            None => (DEFAULT_TEMPORAL[0], DEFAULT_TEMPORAL[1]),
        }
    }

    /// Compiled grouping pattern, if one was requested
    pub fn product_pattern(&self) -> Result<Option<Regex>> {
        self.data_file_regex
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern)
                    .map_err(|e| invalid(format!("data_file_regex does not compile: {e}")))
            })
            .transpose()
    }

    /// Fields copied onto every emitted file object
    pub fn pass_through(&self) -> PassThrough {
        PassThrough {
            mode: self.mode.clone(),
            test_links: self.test_links.clone(),
            reverse_coords: self.reverse_coords,
            asset_name: self.asset_name.clone(),
            asset_roles: self.asset_roles.clone(),
            asset_media_type: self.asset_media_type.clone(),
            cogify: self.cogify,
        }
    }
}

/// Parse an ISO 8601 timestamp with or without offset, or a bare date
///
/// Offset timestamps compare by their UTC instant; naive ones are taken as UTC.
fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.naive_utc());
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(at);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn invalid(message: impl Into<String>) -> DiscoveryError {
    DiscoveryError::InvalidRequest(message.into())
}

/// Discovery response
///
/// Serializes as the echoed request fields plus `objects`. `start_after` is
/// present only when another page remains.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoveryResponse {
    #[serde(flatten)]
    pub request: DiscoveryRequest,

    pub objects: Vec<DiscoveredObject>,
}

impl DiscoveryResponse {
    /// Cursor for the next invocation, if paging continues
    pub fn next_page(&self) -> Option<u64> {
        self.request.start_after
    }

    /// Request the orchestrator should issue next, or `None` once exhausted
    pub fn next_request(&self) -> Option<DiscoveryRequest> {
        self.next_page().map(|_| self.request.clone())
    }
}
