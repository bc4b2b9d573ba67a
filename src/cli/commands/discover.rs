//! Discover command implementation
//!
//! Runs exactly one discovery step. Paging across invocations is left to
//! the caller, which feeds the response's cursor back in.

use crate::config::load_config_or_default;
use crate::core::discovery::DiscoveryEngine;
use crate::domain::{DiscoveryError, DiscoveryRequest, DiscoveryResponse, Result};
use clap::Args;
use std::io::{Read, Write};
use std::path::PathBuf;

/// Arguments for the discover command
#[derive(Args, Debug)]
pub struct DiscoverArgs {
    /// Path to the JSON request, or `-` for stdin
    #[arg(short, long)]
    pub request: String,

    /// Write the JSON response to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the response
    #[arg(long)]
    pub pretty: bool,
}

impl DiscoverArgs {
    /// Execute the discover command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        match self.run(config_path).await {
            Ok(response) => {
                tracing::info!(
                    objects = response.objects.len(),
                    next_page = ?response.next_page(),
                    "Discover command complete"
                );
                Ok(0)
            }
            Err(e) => {
                crate::log_error_with_context!(e, "Discovery step failed");
                eprintln!("Error: {e}");
                Ok(e.exit_code())
            }
        }
    }

    async fn run(&self, config_path: &str) -> Result<DiscoveryResponse> {
        let config = load_config_or_default(config_path)?;
        let request = DiscoveryRequest::from_json(&self.read_request()?)?;

        let engine = DiscoveryEngine::from_config(&config)?;
        let response = engine.step(request).await?;

        self.write_response(&response)?;
        Ok(response)
    }

    fn read_request(&self) -> Result<String> {
        if self.request == "-" {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            return Ok(text);
        }

        std::fs::read_to_string(&self.request).map_err(|e| {
            DiscoveryError::Io(format!("Failed to read request {}: {}", self.request, e))
        })
    }

    fn write_response(&self, response: &DiscoveryResponse) -> Result<()> {
        let mut body = if self.pretty {
            serde_json::to_string_pretty(response)?
        } else {
            serde_json::to_string(response)?
        };
        body.push('\n');

        match &self.output {
            Some(path) => std::fs::write(path, body).map_err(|e| {
                DiscoveryError::Io(format!("Failed to write {}: {}", path.display(), e))
            }),
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(body.as_bytes())?;
                stdout.flush()?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn args(request: &str) -> DiscoverArgs {
        DiscoverArgs {
            request: request.to_string(),
            output: None,
            pretty: false,
        }
    }

    #[test]
    fn test_read_request_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"collection": "C", "version": "1"}}"#).unwrap();

        let text = args(file.path().to_str().unwrap()).read_request().unwrap();
        let request = DiscoveryRequest::from_json(&text).unwrap();
        assert_eq!(request.collection, "C");
    }

    #[test]
    fn test_read_request_missing_file() {
        let err = args("/nonexistent/request.json").read_request().unwrap_err();
        assert!(matches!(err, DiscoveryError::Io(_)));
    }

    #[tokio::test]
    async fn test_invalid_request_exit_code() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"collection": "C", "version": "1", "limit": 0}}"#).unwrap();

        let code = args(file.path().to_str().unwrap())
            .execute("/nonexistent/discovery.toml")
            .await
            .unwrap();
        assert_eq!(code, 3);
    }

    #[test]
    fn test_write_response_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("response.json");
        let mut args = args("-");
        args.output = Some(path.clone());

        let response = DiscoveryResponse {
            request: DiscoveryRequest::new("C", "1"),
            objects: Vec::new(),
        };
        args.write_response(&response).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written["collection"], "C");
        assert_eq!(written["objects"], serde_json::json!([]));
    }
}
