//! `agency.toml` configuration
//!
//! Every section is optional; missing keys take their defaults. Two
//! environment variables override the file so secrets need not live in it:
//! `AGENCY_BACKEND_URL` and `AGENCY_API_KEY`.

use agency_backend::RestConfig;
use agency_list::RetryPolicy;
use agency_query::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File looked up in the working directory when no path is given
pub const CONFIG_FILE: &str = "agency.toml";

/// Overrides `backend.url`
pub const ENV_BACKEND_URL: &str = "AGENCY_BACKEND_URL";
/// Overrides `backend.api_key`
pub const ENV_API_KEY: &str = "AGENCY_API_KEY";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("cannot parse {}: {source}", .path.display())]
    Parse {
        /// File that was parsed
        path: PathBuf,
        /// TOML error with position
        #[source]
        source: toml::de::Error,
    },

    /// A value is out of range or inconsistent
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgencyConfig {
    /// `[backend]`
    pub backend: BackendConfig,
    /// `[retry]`
    pub retry: RetryPolicy,
    /// `[list]`
    pub list: ListConfig,
    /// `[log]`
    pub log: LogConfig,
}

/// Remote backend connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: Option<String>,
    /// Anonymous or service API key
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            timeout_secs: 10,
        }
    }
}

/// List screen defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Items per page when `--page-size` is absent
    pub page_size: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Logging output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directive, used when `RUST_LOG` is unset
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
            json: false,
        }
    }
}

impl AgencyConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With backend URL and key
    #[inline]
    #[must_use]
    pub fn with_backend(mut self, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.backend.url = Some(url.into());
        self.backend.api_key = Some(api_key.into());
        self
    }

    /// With retry policy
    #[inline]
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// With default page size
    #[inline]
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.list.page_size = page_size;
        self
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` on malformed TOML or unknown value types
    pub fn from_toml_str(raw: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read and parse a config file, without environment overrides
    ///
    /// # Errors
    /// Returns `ConfigError::Read` or `ConfigError::Parse`
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw, path)
    }

    /// Resolve configuration for a run
    ///
    /// An explicit path must exist. Without one, `./agency.toml` is used if
    /// present and defaults otherwise. Environment overrides apply last.
    ///
    /// # Errors
    /// Returns any read, parse or validation error
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        tracing::debug!(?explicit, "configuration resolved");
        Ok(config)
    }

    /// Apply `AGENCY_*` overrides from a variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BACKEND_URL).filter(|v| !v.trim().is_empty()) {
            self.backend.url = Some(url);
        }
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
            self.backend.api_key = Some(key);
        }
    }

    /// Reject values no command can work with
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` naming the offending key
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.list.page_size == 0 {
            return Err(ConfigError::Invalid("list.page_size must be at least 1".into()));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid("retry.max_attempts must be at least 1".into()));
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Invalid("backend.timeout_secs must be at least 1".into()));
        }
        Ok(())
    }

    /// REST client settings, if a backend URL is configured
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if a URL is set without an API key
    pub fn rest_config(&self) -> Result<Option<RestConfig>, ConfigError> {
        let Some(url) = &self.backend.url else {
            return Ok(None);
        };
        let api_key = self.backend.api_key.as_ref().ok_or_else(|| {
            ConfigError::Invalid(format!(
                "backend.url is set but no API key; set backend.api_key or {ENV_API_KEY}"
            ))
        })?;
        Ok(Some(
            RestConfig::new(url.clone(), api_key.clone())
                .with_timeout(Duration::from_secs(self.backend.timeout_secs)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_list_defaults() {
        let config = AgencyConfig::new();
        assert_eq!(config.list.page_size, 10);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.slow_threshold_ms, 5_000);
        assert!(config.backend.url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = AgencyConfig::from_toml_str(
            "[retry]\nmax_attempts = 5\n",
            Path::new("inline.toml"),
        )
        .unwrap();
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.base_delay_ms, 1_000);
        assert_eq!(config.list, ListConfig::default());
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = AgencyConfig::new().with_backend("https://file.example", "file-key");
        config.apply_overrides(|key| match key {
            ENV_BACKEND_URL => Some("https://env.example".to_string()),
            ENV_API_KEY => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.backend.url.as_deref(), Some("https://env.example"));
        assert_eq!(config.backend.api_key.as_deref(), Some("file-key"));
    }

    #[test]
    fn url_without_key_is_invalid() {
        let mut config = AgencyConfig::new();
        config.backend.url = Some("https://xyz.supabase.co".into());
        assert!(matches!(config.rest_config(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rest_config_carries_timeout() {
        let mut config = AgencyConfig::new().with_backend("https://xyz.supabase.co", "anon");
        config.backend.timeout_secs = 3;
        let rest = config.rest_config().unwrap().unwrap();
        assert_eq!(rest.timeout, Duration::from_secs(3));
        assert_eq!(rest.api_key, "anon");
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let config = AgencyConfig::new().with_page_size(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
