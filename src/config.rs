//! Configuration Module
//!
//! This module defines the configuration structures for the verifier service.
//! Configuration is loaded from TOML files and parsed using serde.

use serde::Deserialize;
use std::fs;

/// Main configuration structure
///
/// Loaded from a TOML file (e.g., config/default.toml).
///
/// # Example TOML
/// ```toml
/// [api]
/// host = "127.0.0.1"
/// port = 10050
///
/// [contract]
/// log_accepted = true
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub contract: ContractConfig,
}

/// API server configuration
///
/// # Fields
/// - `host`: IP address to bind to (e.g., "127.0.0.1" or "0.0.0.0")
/// - `port`: TCP port to listen on
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

/// Contract verification settings
#[derive(Debug, Clone, Deserialize)]
pub struct ContractConfig {
    /// Log accepted verdicts at info level; rejections are always logged
    #[serde(default = "default_log_accepted")]
    pub log_accepted: bool,
}

fn default_log_accepted() -> bool {
    true
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            log_accepted: default_log_accepted(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was successfully loaded and parsed
    /// * `Err` if the file couldn't be read or the TOML is invalid
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
