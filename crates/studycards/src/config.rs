//! Configuration management for studycards.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::{ListQuery, DEFAULT_MAX_RECORDS, DEFAULT_VIEW};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "studycards";

/// Upper bound the remote API accepts for `maxRecords` on one page.
const MAX_RECORDS_LIMIT: usize = 100;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `STUDYCARDS_`, sections split on `__`)
/// 2. TOML config file at `~/.config/studycards/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote table configuration.
    pub remote: RemoteConfig,
}

/// Where the card table lives and how to reach it.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// API root, e.g. `https://api.airtable.com/v0`.
    pub base_url: String,
    /// Identifier of the base holding the table.
    pub base_id: String,
    /// Table name.
    pub table: String,
    /// View used when listing cards.
    pub view: Option<String>,
    /// API key sent with every request.
    pub api_key: Option<String>,
    /// Number of cards fetched on load.
    pub max_records: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("base_url", &self.base_url)
            .field("base_id", &self.base_id)
            .field("table", &self.table)
            .field("view", &self.view)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("max_records", &self.max_records)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.airtable.com/v0".to_string(),
            base_id: "appgyWdA8yP0KXZr4".to_string(),
            table: "My Study Cards".to_string(),
            view: Some(DEFAULT_VIEW.to_string()),
            api_key: None,
            max_records: DEFAULT_MAX_RECORDS,
            timeout_secs: 30,
        }
    }
}

impl RemoteConfig {
    /// The list query used when loading cards.
    #[must_use]
    pub fn list_query(&self) -> ListQuery {
        ListQuery {
            max_records: self.max_records,
            view: self.view.clone(),
        }
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// A copy safe to print: the API key is masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            api_key: self.api_key.as_ref().map(|_| "********".to_string()),
            ..self.clone()
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("STUDYCARDS_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let remote = &self.remote;

        if !remote.base_url.starts_with("http://") && !remote.base_url.starts_with("https://") {
            return Err(Error::ConfigValidation {
                message: format!(
                    "base_url must start with http:// or https:// (got {:?})",
                    remote.base_url
                ),
            });
        }

        if remote.base_id.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "base_id must not be empty".to_string(),
            });
        }

        if remote.table.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "table must not be empty".to_string(),
            });
        }

        if remote.max_records == 0 || remote.max_records > MAX_RECORDS_LIMIT {
            return Err(Error::ConfigValidation {
                message: format!(
                    "max_records must be between 1 and {MAX_RECORDS_LIMIT} (got {})",
                    remote.max_records
                ),
            });
        }

        if remote.timeout_secs == 0 {
            return Err(Error::ConfigValidation {
                message: "timeout_secs must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.remote.base_url, "https://api.airtable.com/v0");
        assert_eq!(config.remote.table, "My Study Cards");
        assert_eq!(config.remote.view.as_deref(), Some("Main View"));
        assert_eq!(config.remote.max_records, 20);
        assert!(config.remote.api_key.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_base_url() {
        let mut config = Config::default();
        config.remote.base_url = "ftp://example.com".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("base_url"));
    }

    #[test]
    fn test_validate_empty_table() {
        let mut config = Config::default();
        config.remote.table = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("table"));
    }

    #[test]
    fn test_validate_empty_base_id() {
        let mut config = Config::default();
        config.remote.base_id = String::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("base_id"));
    }

    #[test]
    fn test_validate_max_records_bounds() {
        let mut config = Config::default();
        config.remote.max_records = 0;
        assert!(config.validate().is_err());

        config.remote.max_records = 101;
        assert!(config.validate().is_err());

        config.remote.max_records = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.remote.timeout_secs = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("timeout_secs"));
    }

    #[test]
    fn test_list_query_from_config() {
        let mut config = Config::default();
        config.remote.max_records = 5;
        config.remote.view = None;

        let query = config.remote.list_query();
        assert_eq!(query.max_records, 5);
        assert!(query.view.is_none());
    }

    #[test]
    fn test_timeout() {
        assert_eq!(Config::default().remote.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_debug_and_redacted_hide_key() {
        let mut config = Config::default();
        config.remote.api_key = Some("keySECRET".to_string());

        let debug_str = format!("{config:?}");
        assert!(!debug_str.contains("keySECRET"));

        let json = serde_json::to_string(&config.remote.redacted()).unwrap();
        assert!(!json.contains("keySECRET"));
        assert!(json.contains("********"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("studycards"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        figment::Jail::expect_with(|_jail| {
            let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_toml_and_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [remote]
                base_id = "appFromFile"
                table = "Flashcards"
                max_records = 50
                "#,
            )?;
            jail.set_env("STUDYCARDS_REMOTE__API_KEY", "keyFromEnv");

            let config = Config::load_from(Some(PathBuf::from("config.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.remote.base_id, "appFromFile");
            assert_eq!(config.remote.table, "Flashcards");
            assert_eq!(config.remote.max_records, 50);
            assert_eq!(config.remote.api_key.as_deref(), Some("keyFromEnv"));
            Ok(())
        });
    }

    #[test]
    fn test_load_invalid_values_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[remote]\nmax_records = 0\n")?;
            let result = Config::load_from(Some(PathBuf::from("config.toml")));
            assert!(result.is_err());
            Ok(())
        });
    }
}
