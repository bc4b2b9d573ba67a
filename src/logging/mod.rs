//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output at a configurable level
//! - JSON-formatted local file logs with rotation
//!
//! # Example
//!
//! ```no_run
//! use granule_discovery::logging::init_logging;
//! use granule_discovery::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Discovery started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a fetched catalog page
///
/// # Example
///
/// ```no_run
/// use granule_discovery::log_page_fetched;
///
/// log_page_fetched!("AFRISAR_DLR", 1, 250, 100);
/// ```
#[macro_export]
macro_rules! log_page_fetched {
    ($collection:expr, $page:expr, $hits:expr, $returned:expr) => {
        tracing::info!(
            collection = %$collection,
            page = $page,
            hits = $hits,
            returned = $returned,
            "Fetched catalog page"
        );
    };
}

/// Log the next-page decision for a cursor
///
/// # Example
///
/// ```no_run
/// use granule_discovery::log_cursor_decision;
/// use granule_discovery::core::discovery::PageCursor;
///
/// let cursor = PageCursor::new(1, 100, 250);
/// log_cursor_decision!(cursor, cursor.next(100));
/// ```
#[macro_export]
macro_rules! log_cursor_decision {
    ($cursor:expr, $next:expr) => {
        match $next {
            Some(next) => tracing::debug!(
                page = $cursor.page,
                limit = $cursor.limit,
                hits = $cursor.hits,
                next_page = next,
                "More pages remain"
            ),
            None => tracing::debug!(
                page = $cursor.page,
                limit = $cursor.limit,
                hits = $cursor.hits,
                "Paging exhausted"
            ),
        }
    };
}

/// Log a granule that produced no output
#[macro_export]
macro_rules! log_granule_dropped {
    ($granule_id:expr, $reason:expr) => {
        tracing::debug!(
            granule_id = %$granule_id,
            reason = $reason,
            "Dropping granule"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use granule_discovery::log_error_with_context;
/// use granule_discovery::domain::DiscoveryError;
///
/// let error = DiscoveryError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::core::discovery::PageCursor;
    use crate::domain::GranuleId;

    #[test]
    fn test_macros_expand() {
        let cursor = PageCursor::new(1, 100, 250);
        crate::log_page_fetched!("C", cursor.page, cursor.hits, 100usize);
        crate::log_cursor_decision!(cursor, cursor.next(100));
        crate::log_cursor_decision!(cursor, cursor.next(0));

        let id = GranuleId::new("G1").unwrap();
        crate::log_granule_dropped!(id, "no asset link");

        let error = crate::domain::DiscoveryError::Other("boom".to_string());
        crate::log_error_with_context!(&error, "step failed");
    }
}
