//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::DiscoveryConfig;
use crate::domain::errors::DiscoveryError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into DiscoveryConfig
/// 4. Applies environment variable overrides (DISCOVERY_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use granule_discovery::config::loader::load_config;
///
/// let config = load_config("discovery.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<DiscoveryConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DiscoveryError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        DiscoveryError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: DiscoveryConfig = toml::from_str(&contents)
        .map_err(|e| DiscoveryError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);
    validate(&config)?;

    Ok(config)
}

/// Loads configuration from a TOML file, or from defaults if the file does not exist
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<DiscoveryConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(
        config_path = %path.display(),
        "Configuration file not found, using defaults"
    );
    let mut config = DiscoveryConfig::default();
    apply_env_overrides(&mut config);
    validate(&config)?;
    Ok(config)
}

fn validate(config: &DiscoveryConfig) -> Result<()> {
    config.validate().map_err(|e| {
        DiscoveryError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is valid")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(DiscoveryError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using DISCOVERY_* prefix
///
/// Environment variables follow the pattern: DISCOVERY_<SECTION>_<KEY>
/// For example: DISCOVERY_CATALOG_BASE_URL, DISCOVERY_LOGGING_LOCAL_PATH
fn apply_env_overrides(config: &mut DiscoveryConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("DISCOVERY_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Catalog overrides
    if let Ok(val) = std::env::var("DISCOVERY_CATALOG_BASE_URL") {
        config.catalog.base_url = val;
    }
    if let Ok(val) = std::env::var("DISCOVERY_CATALOG_HITS_HEADER") {
        config.catalog.hits_header = val;
    }
    if let Ok(val) = std::env::var("DISCOVERY_CATALOG_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.catalog.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("DISCOVERY_CATALOG_TLS_VERIFY") {
        config.catalog.tls_verify = val.parse().unwrap_or(true);
    }

    // Classification overrides
    if let Ok(val) = std::env::var("DISCOVERY_CLASSIFICATION_DIRECT_ACCESS_REL") {
        config.classification.direct_access_rel = val;
    }
    if let Ok(val) = std::env::var("DISCOVERY_CLASSIFICATION_DATA_REL_SUFFIX") {
        config.classification.data_rel_suffix = val;
    }
    if let Ok(val) = std::env::var("DISCOVERY_CLASSIFICATION_NATIVE_ITEM_SCHEME") {
        config.classification.native_item_scheme = val;
    }
    if let Ok(val) = std::env::var("DISCOVERY_CLASSIFICATION_NATIVE_ITEM_SUFFIX") {
        config.classification.native_item_suffix = val;
    }
    if let Ok(val) = std::env::var("DISCOVERY_CLASSIFICATION_NATIVE_MODE") {
        config.classification.native_mode = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("DISCOVERY_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("DISCOVERY_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("DISCOVERY_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
