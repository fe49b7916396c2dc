//! Configuration management for the back-office

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "BACKOFFICE";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Panel presentation configuration
    #[serde(default)]
    pub panel: PanelConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Bearer token; takes precedence over the session file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Session file holding the persisted token
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,

    /// Key of the token inside the session file
    #[serde(default = "default_token_key")]
    pub token_key: String,
}

/// Panel presentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Groups shown per page on grouped panels
    #[serde(default = "default_groups_per_page")]
    pub groups_per_page: usize,

    /// Default output format (table or json)
    #[serde(default = "default_output")]
    pub output: String,

    /// Company name used by email templates
    #[serde(default = "default_company")]
    pub company: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or pretty)
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Log to file
    #[serde(default)]
    pub file: Option<PathBuf>,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

const fn default_request_timeout() -> u64 {
    30
}

const fn default_connect_timeout() -> u64 {
    5
}

fn default_user_agent() -> String {
    format!("backoffice/{}", env!("CARGO_PKG_VERSION"))
}

fn default_session_file() -> PathBuf {
    PathBuf::from(".backoffice/session.json")
}

fn default_token_key() -> String {
    "token".to_string()
}

const fn default_groups_per_page() -> usize {
    5
}

fn default_output() -> String {
    "table".to_string()
}

fn default_company() -> String {
    "Our Team".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token: None,
            session_file: default_session_file(),
            token_key: default_token_key(),
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            groups_per_page: default_groups_per_page(),
            output: default_output(),
            company: default_company(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from `backoffice.toml` and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (or the default one) and the environment
    ///
    /// Environment variables use the `BACKOFFICE` prefix with `__` between
    /// section and key, e.g. `BACKOFFICE_API__BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing or any source fails to parse.
    pub fn load_from(path: Option<&Path>) -> crate::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("backoffice").required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot check on its own
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn validate(&self) -> crate::Result<()> {
        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(crate::Error::validation(
                "api.base_url",
                "must start with http:// or https://",
            ));
        }
        if self.api.request_timeout == 0 {
            return Err(crate::Error::validation(
                "api.request_timeout",
                "must be greater than zero",
            ));
        }
        if self.panel.groups_per_page == 0 {
            return Err(crate::Error::validation(
                "panel.groups_per_page",
                "must be greater than zero",
            ));
        }
        if self.auth.token_key.trim().is_empty() {
            return Err(crate::Error::validation("auth.token_key", "must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.request_timeout, 30);
        assert_eq!(config.api.connect_timeout, 5);
        assert!(config.api.user_agent.starts_with("backoffice/"));

        assert!(config.auth.token.is_none());
        assert_eq!(config.auth.token_key, "token");
        assert_eq!(
            config.auth.session_file,
            PathBuf::from(".backoffice/session.json")
        );

        assert_eq!(config.panel.groups_per_page, 5);
        assert_eq!(config.panel.output, "table");

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.logging.file.is_none());

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_deserialization() {
        let json_str = r#"{
            "api": {"base_url": "https://api.example.com"},
            "panel": {"groups_per_page": 10}
        }"#;

        let config: Config = serde_json::from_str(json_str).unwrap();

        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.request_timeout, 30); // Uses default
        assert_eq!(config.panel.groups_per_page, 10);
        assert_eq!(config.panel.output, "table"); // Uses default
        assert_eq!(config.auth.token_key, "token");
    }

    #[test]
    fn test_token_not_serialized_when_absent() {
        let serialized = serde_json::to_string(&Config::default()).unwrap();
        assert!(!serialized.contains("\"token\":"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.api.base_url = "ftp://example.com".to_string();
        assert!(matches!(
            config.validate(),
            Err(crate::Error::Validation { ref field, .. }) if field == "api.base_url"
        ));

        let mut config = Config::default();
        config.panel.groups_per_page = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.auth.token_key = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://admin.example.com\"\n\n[auth]\ntoken_key = \"authToken\""
        )
        .unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.api.base_url, "https://admin.example.com");
        assert_eq!(config.auth.token_key, "authToken");
        assert_eq!(config.panel.groups_per_page, 5);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let result = Config::load_from(Some(Path::new("/nonexistent/backoffice.toml")));
        assert!(matches!(result, Err(crate::Error::Configuration { .. })));
    }
}
