// Granule Discovery - Catalog Paging and Granule Grouping Engine
// Copyright (c) 2025 Granule Discovery Contributors
// Licensed under the MIT License

//! # Granule Discovery
//!
//! Discovers data granules in a metadata catalog (CMR) and turns them into
//! file-level work units for a downstream ingestion pipeline.
//!
//! ## Overview
//!
//! Each invocation is one resumable step:
//! - **Fetches** one page of granules for a collection and version
//! - **Classifies** each granule as catalog-native, multi-asset or single-asset
//! - **Groups** single-asset files that belong to the same product
//! - **Emits** the objects together with the cursor for the next page
//!
//! The step keeps no state between calls. The paging cursor travels in the
//! request and response payloads, so an external orchestrator can loop and
//! retry freely.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Paging, classification, grouping and assembly
//! - [`adapters`] - Catalog search client
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use granule_discovery::config::load_config_or_default;
//! use granule_discovery::core::discovery::DiscoveryEngine;
//! use granule_discovery::domain::DiscoveryRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default("discovery.toml")?;
//!     let engine = DiscoveryEngine::from_config(&config)?;
//!
//!     let mut request = DiscoveryRequest::new("AFRISAR_DLR", "1");
//!     request.data_file = vec!["HH.tiff".to_string(), "prj".to_string()];
//!     request.data_file_regex = Some("afrisar_dlr_[^_]+".to_string());
//!
//!     let mut next = Some(request);
//!     while let Some(request) = next {
//!         let response = engine.step(request).await?;
//!         for object in &response.objects {
//!             println!("{}", serde_json::to_string(object)?);
//!         }
//!         next = response.next_request();
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All library errors are [`domain::DiscoveryError`]. Invalid requests are
//! rejected before any catalog call, and catalog failures are surfaced to
//! the caller without retries.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
