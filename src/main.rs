// Granule Discovery - Catalog Paging and Granule Grouping Engine
// Copyright (c) 2025 Granule Discovery Contributors
// Licensed under the MIT License

use clap::Parser;
use granule_discovery::cli::Cli;
use granule_discovery::config::{load_config_or_default, DiscoveryConfig};
use granule_discovery::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // A broken config is reported by the command itself; log with defaults meanwhile
    let config = load_config_or_default(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: {e}; logging with default settings");
        DiscoveryConfig::default()
    });

    let guard = match init_logging(cli.effective_log_level(&config), &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Granule Discovery");

    let exit_code = match cli.execute().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors
    drop(guard);
    process::exit(exit_code);
}
