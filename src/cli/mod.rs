//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for granule discovery using clap.

pub mod commands;

use crate::config::DiscoveryConfig;
use clap::{Parser, Subcommand};

/// Granule Discovery - catalog paging and granule grouping
#[derive(Parser, Debug)]
#[command(name = "granule-discovery")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "discovery.toml", env = "DISCOVERY_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DISCOVERY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one discovery step on a JSON request
    Discover(commands::discover::DiscoverArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}

impl Cli {
    /// Log level to initialize with: `--log-level` wins over `application.log_level`
    pub fn effective_log_level<'a>(&'a self, config: &'a DiscoveryConfig) -> &'a str {
        self.log_level
            .as_deref()
            .unwrap_or(config.application.log_level.as_str())
    }

    /// Execute the selected command and return the process exit code
    pub async fn execute(&self) -> anyhow::Result<i32> {
        match &self.command {
            Commands::Discover(args) => args.execute(&self.config).await,
            Commands::ValidateConfig(args) => args.execute(&self.config).await,
        }
    }
}
