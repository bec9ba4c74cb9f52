//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use dairy_client::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content, is_json(path))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse config text, TOML unless `json` is set.
    pub fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL all endpoint paths are joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

/// Session settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// File holding the bearer token. `~/` expands to the home directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_file: Option<String>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

/// Generate a default dairy.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Dairy return-order CLI configuration

[api]
base_url = "{base_url}"
# timeout_secs = 30

[session]
# Bearer token file. --token and DAIRY_TOKEN take precedence.
# token_file = "~/.dairy/token"

[logging]
format = "human"
"#,
        base_url = DEFAULT_BASE_URL
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips() {
        let config = CliConfig::parse(&generate_default_config(), false).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs, None);
        assert_eq!(config.session.token_file, None);
        assert_eq!(config.logging.format, LogFormat::Human);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CliConfig::parse("", false).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_parse_toml() {
        let config = CliConfig::parse(
            r#"
[api]
base_url = "http://localhost:8080/api"
timeout_secs = 5

[session]
token_file = "~/.dairy/token"

[logging]
format = "json"
"#,
            false,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.api.timeout_secs, Some(5));
        assert_eq!(config.session.token_file.as_deref(), Some("~/.dairy/token"));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_parse_json() {
        let config =
            CliConfig::parse(r#"{"api": {"timeout_secs": 10}}"#, true).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs, Some(10));
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        assert!(CliConfig::parse("[logging]\nformat = \"xml\"\n", false).is_err());
    }
}
