//! Configuration for vwanctl.
//!
//! Settings are merged from multiple sources, lowest precedence first:
//! - Built-in defaults
//! - User configuration (`~/.vwanctl.toml`)
//! - Project configuration (`./vwanctl.toml`)
//! - An explicit `--config` file
//! - Environment variables (`AZURE_SUBSCRIPTION_ID`, `VWANCTL_ENDPOINT`)
//!
//! The access token itself is never stored in a file; it is read from
//! `AZURE_ACCESS_TOKEN` when the client is built.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the bearer token for the management API.
pub const TOKEN_ENV: &str = "AZURE_ACCESS_TOKEN";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Azure endpoint and subscription settings
    pub azure: AzureConfig,

    /// HTTP client settings
    pub http: HttpConfig,
}

/// Azure endpoint and subscription settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureConfig {
    /// Subscription to operate in
    pub subscription_id: Option<String>,

    /// Management endpoint base URL
    pub endpoint: String,

    /// API version sent with every request
    pub api_version: String,
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            subscription_id: None,
            endpoint: "https://management.azure.com".to_string(),
            api_version: "2018-04-01".to_string(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 60 }
    }
}

impl Config {
    /// Load configuration, optionally from an explicit file.
    ///
    /// Without an explicit path, `./vwanctl.toml` wins over
    /// `~/.vwanctl.toml`; defaults apply when neither exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(explicit) => Self::from_file(explicit)?,
            None => {
                let candidates = Self::default_paths();
                match candidates.iter().find(|p| p.exists()) {
                    Some(found) => Self::from_file(found)?,
                    None => Self::default(),
                }
            }
        };

        config.apply_env();
        Ok(config)
    }

    /// Read and parse a single TOML config file.
    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read '{}': {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse '{}': {}", path.display(), e)))
    }

    /// Project-then-user lookup order.
    fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("vwanctl.toml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".vwanctl.toml"));
        }
        paths
    }

    /// Overlay environment variables.
    fn apply_env(&mut self) {
        if let Ok(sub) = std::env::var("AZURE_SUBSCRIPTION_ID") {
            if !sub.is_empty() {
                self.azure.subscription_id = Some(sub);
            }
        }
        if let Ok(endpoint) = std::env::var("VWANCTL_ENDPOINT") {
            if !endpoint.is_empty() {
                self.azure.endpoint = endpoint;
            }
        }
    }

    /// The subscription to use, or a configuration error naming the fix.
    pub fn subscription_id(&self) -> Result<&str> {
        self.azure.subscription_id.as_deref().ok_or_else(|| {
            Error::Config(
                "no subscription configured; set AZURE_SUBSCRIPTION_ID, use --subscription, \
                 or add 'subscription_id' to the [azure] section of vwanctl.toml"
                    .to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.azure.endpoint, "https://management.azure.com");
        assert_eq!(config.azure.api_version, "2018-04-01");
        assert_eq!(config.http.timeout_secs, 60);
        assert!(config.azure.subscription_id.is_none());
    }

    #[test]
    fn test_parse_toml() {
        let parsed: Config = toml::from_str(
            r#"
            [azure]
            subscription_id = "0000-1111"
            endpoint = "https://management.usgovcloudapi.net"

            [http]
            timeout_secs = 30
            "#,
        )
        .unwrap();
        assert_eq!(parsed.azure.subscription_id.as_deref(), Some("0000-1111"));
        assert_eq!(parsed.azure.endpoint, "https://management.usgovcloudapi.net");
        assert_eq!(parsed.http.timeout_secs, 30);
        // Unspecified sections keep their defaults.
        assert_eq!(parsed.azure.api_version, "2018-04-01");
    }

    #[test]
    fn test_missing_subscription_is_a_config_error() {
        let config = Config::default();
        assert!(matches!(
            config.subscription_id().unwrap_err(),
            Error::Config(_)
        ));
    }
}
