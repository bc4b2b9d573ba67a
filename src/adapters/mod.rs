//! Adapters for external systems
//!
//! - [`catalog`] - Metadata catalog search (CMR)

pub mod catalog;
