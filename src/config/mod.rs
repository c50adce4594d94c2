//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::core::resource::ResourceKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides `api.base_url`
pub const API_URL_ENV: &str = "STATION_API_URL";

/// Where the REST API lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every resource path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

/// Where generated reports are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Per-resource overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Collection path segment, when it differs from the default
    pub path: Option<String>,
}

/// Complete console configuration
///
/// ```yaml
/// api:
///   base_url: http://localhost:5000/api
///   timeout_secs: 10
/// reports:
///   output_dir: ./reports
/// resources:
///   utility-expenses:
///     path: utilityexpenses
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub reports: ReportConfig,

    /// Keyed by resource path (`sales`, `utility-expenses`, ...)
    #[serde(default)]
    pub resources: HashMap<String, ResourceConfig>,
}

impl ConsoleConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            self.api.base_url = url;
        }
        self
    }

    /// Check values that serde alone cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                message: format!("expected an http(s) URL, got '{}'", url),
            });
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        for key in self.resources.keys() {
            key.parse::<ResourceKind>()
                .map_err(|message| ConfigError::InvalidValue {
                    field: format!("resources.{}", key),
                    message,
                })?;
        }

        Ok(())
    }

    /// Collection path for a resource, honouring overrides
    pub fn resource_path(&self, kind: ResourceKind) -> String {
        self.resources
            .iter()
            .find(|(key, _)| key.parse::<ResourceKind>().ok() == Some(kind))
            .and_then(|(_, rc)| rc.path.clone())
            .unwrap_or_else(|| kind.path().to_string())
    }

    /// Build the shared HTTP client
    pub fn http_client(&self) -> Result<reqwest::Client, ConfigError> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.api.timeout_secs))
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: "api".to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConsoleConfig::default();

        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.reports.output_dir, PathBuf::from("."));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_with_overrides() {
        let yaml = r#"
api:
  base_url: https://station.example.com/api
reports:
  output_dir: /tmp/reports
resources:
  utility_expenses:
    path: utilityexpenses
"#;
        let config = ConsoleConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.api.base_url, "https://station.example.com/api");
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(
            config.resource_path(ResourceKind::UtilityExpense),
            "utilityexpenses"
        );
        assert_eq!(config.resource_path(ResourceKind::Sale), "sales");
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = ConsoleConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = ConsoleConfig::from_yaml_str("api:\n  base_url: ftp://nope\n").unwrap_err();
        assert!(err.to_string().contains("api.base_url"));

        let err = ConsoleConfig::from_yaml_str("api:\n  timeout_secs: 0\n").unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));

        let err = ConsoleConfig::from_yaml_str("resources:\n  invoices: {}\n").unwrap_err();
        assert!(err.to_string().contains("resources.invoices"));
    }

    #[test]
    fn test_yaml_serialization() {
        let config = ConsoleConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = ConsoleConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ConsoleConfig::from_yaml_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
