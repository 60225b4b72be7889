//! Configuration handling for the TUI

use crate::api::DEFAULT_API_HOST;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the configured API host
pub const API_HOST_ENV: &str = "QUOTE_API_HOST";

/// Project directories shared by config, logs and the resume token
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "hugo", "quote-tui")
}

/// User configuration for the TUI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Base URL of the quote API
    pub api_host: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load from `path`, defaulting when the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: TuiConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, writing a default file on first run so the host
    /// can be edited
    pub fn load_or_create() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            let config = Self::default();
            config.save_to(&path)?;
            tracing::info!(path = %path.display(), "Wrote default configuration");
            return Ok(config);
        }
        Self::load_from(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// API host from the environment, then the config file, then the default
    pub fn api_host(&self) -> String {
        self.resolve_api_host(std::env::var(API_HOST_ENV).ok())
    }

    fn resolve_api_host(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_host.clone())
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.api_host.is_none());
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, TuiConfig::default());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"api_host": "http://quotes.test", "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.api_host.as_deref(), Some("http://quotes.test"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = TuiConfig {
            api_host: Some("http://quotes.test:8080".to_string()),
        };
        config.save_to(&path).unwrap();
        assert_eq!(TuiConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let loaded = TuiConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(loaded, TuiConfig::default());
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(TuiConfig::load_from(&path).is_err());
    }

    mod api_host {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_defaults_to_localhost() {
            let config = TuiConfig::default();
            assert_eq!(config.resolve_api_host(None), "http://localhost:5000");
        }

        #[test]
        fn test_config_value_used() {
            let config = TuiConfig {
                api_host: Some("http://quotes.test".to_string()),
            };
            assert_eq!(config.resolve_api_host(None), "http://quotes.test");
        }

        #[test]
        fn test_env_overrides_config() {
            let config = TuiConfig {
                api_host: Some("http://quotes.test".to_string()),
            };
            assert_eq!(
                config.resolve_api_host(Some("http://env.test".to_string())),
                "http://env.test"
            );
            assert_eq!(
                config.resolve_api_host(Some("  ".to_string())),
                "http://quotes.test"
            );
        }
    }
}
