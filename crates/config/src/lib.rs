//! Configuration loading and validation for docsage.
//!
//! Loads `docsage.toml` from the working directory with `DOCSAGE_*`
//! environment variable overrides. Validates settings at startup so a
//! missing API key is a boot error, not a per-request one.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "docsage.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// The root configuration structure.
///
/// Maps directly to `docsage.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Generative-model API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model identifier sent to the hosted API.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generative-model API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout for remote model calls, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_model() -> String {
    "gemini-1.5-flash-latest".into()
}
fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}
fn default_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted upload size, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8000
}
fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            request_timeout_secs: default_timeout_secs(),
            server: ServerConfig::default(),
        }
    }
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("server", &self.server)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration: `docsage.toml` if present, then environment
    /// variable overrides on top.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_file(Path::new(CONFIG_FILE))?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load a specific config file, or defaults when it does not exist.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            debug!(path = %path.display(), "loading config file");
            let raw = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&raw)?)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Environment overrides. `DOCSAGE_API_KEY` wins over `GOOGLE_API_KEY`,
    /// which is accepted for compatibility with existing deployments.
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("DOCSAGE_API_KEY") {
            self.api_key = Some(key);
        } else if let Ok(key) = std::env::var("GOOGLE_API_KEY") {
            self.api_key = Some(key);
        }
        if let Ok(model) = std::env::var("DOCSAGE_MODEL") {
            self.model = model;
        }
        if let Ok(url) = std::env::var("DOCSAGE_BASE_URL") {
            self.base_url = url;
        }
        if let Ok(host) = std::env::var("DOCSAGE_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("DOCSAGE_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
        }
        if let Ok(secs) = std::env::var("DOCSAGE_TIMEOUT_SECS")
            && let Ok(secs) = secs.parse()
        {
            self.request_timeout_secs = secs;
        }
    }

    /// Validate settings needed to serve requests.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.api_key {
            None => {
                return Err(ConfigError::Invalid(
                    "no API key configured; set DOCSAGE_API_KEY or api_key in docsage.toml".into(),
                ));
            }
            Some(key) if key.trim().is_empty() => {
                return Err(ConfigError::Invalid("api_key is empty".into()));
            }
            Some(_) => {}
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be > 0".into()));
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.model, "gemini-1.5-flash-latest");
        assert_eq!(config.request_timeout_secs, 120);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_file(Path::new("/nonexistent/docsage.toml")).unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key = \"test-key\"\n\n[server]\nport = 9090").unwrap();

        let config = AppConfig::load_file(file.path()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.model, "gemini-1.5-flash-latest");
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key = [not toml").unwrap();
        assert!(matches!(
            AppConfig::load_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn validate_requires_api_key() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_err());

        config.api_key = Some("  ".into());
        assert!(config.validate().is_err());

        config.api_key = Some("key".into());
        config.validate().unwrap();
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = AppConfig {
            api_key: Some("super-secret".into()),
            ..AppConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
