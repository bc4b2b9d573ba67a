//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the discovery configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates after applying overrides
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Catalog URL: {}", config.catalog.base_url);
        println!("  Hits Header: {}", config.catalog.hits_header);
        println!("  Timeout: {}s", config.catalog.timeout_seconds);
        println!("  TLS Verify: {}", config.catalog.tls_verify);
        println!(
            "  Direct Access Rel: {}",
            config.classification.direct_access_rel
        );
        println!("  Data Rel Suffix: {}", config.classification.data_rel_suffix);
        println!("  Native Mode: {}", config.classification.native_mode);
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();
        Ok(0)
    }
}
