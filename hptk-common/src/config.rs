//! Bootstrap configuration loading
//!
//! Settings sources, highest priority first:
//! 1. Command-line arguments (applied by the binary)
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Built-in defaults (code constants)
//!
//! A missing TOML file is not an error: the service logs a warning and starts
//! on defaults. A file that exists but does not parse is a configuration error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable holding the translator credential
pub const TRANSLATE_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Environment variable holding the email drafter credential
pub const DRAFTER_KEY_ENV: &str = "OPENROUTER_API_KEY_DRAFTER";

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "HPTK_CONFIG";

/// Bootstrap configuration loaded from TOML file
///
/// These settings cannot change while the service runs.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Chat-completion upstream settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Chat-completion upstream settings
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL; `/chat/completions` is appended
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Credential for the translator (overridden by `OPENROUTER_API_KEY`)
    #[serde(default)]
    pub translate_api_key: Option<String>,

    /// Credential for the email drafter (overridden by `OPENROUTER_API_KEY_DRAFTER`)
    #[serde(default)]
    pub drafter_api_key: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5790
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "openai/gpt-4o-mini".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            upstream: UpstreamConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            translate_api_key: None,
            drafter_api_key: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from an explicit file path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load configuration, falling back to defaults when no file exists
    ///
    /// `explicit` is the path given on the command line, if any. Without it,
    /// `HPTK_CONFIG` and then the platform config directory are consulted.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match resolve_path(explicit) {
            Some(path) if path.exists() => {
                info!("Loading configuration from {}", path.display());
                Self::load_from(&path)
            }
            Some(path) => {
                warn!(
                    "Config file {} not found, using built-in defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            None => {
                warn!("No config directory available, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Translator credential: environment first, then TOML
    pub fn translate_api_key(&self) -> Option<String> {
        resolve_secret(TRANSLATE_KEY_ENV, self.upstream.translate_api_key.as_deref())
    }

    /// Drafter credential: environment first, then TOML
    pub fn drafter_api_key(&self) -> Option<String> {
        resolve_secret(DRAFTER_KEY_ENV, self.upstream.drafter_api_key.as_deref())
    }
}

/// Config file to read: `explicit`, else `HPTK_CONFIG`, else the platform
/// default. The file may not exist.
pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => std::env::var(CONFIG_PATH_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or_else(default_config_path),
    }
}

/// Platform config file location (`~/.config/hptk/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hptk").join("config.toml"))
}

/// Resolve a credential from an environment variable, falling back to a
/// configured value. Blank values count as missing.
pub fn resolve_secret(env_var_name: &str, configured: Option<&str>) -> Option<String> {
    let env_value = std::env::var(env_var_name).ok();
    if let Some(key) = env_value.as_deref().filter(|k| is_valid_key(k)) {
        return Some(key.trim().to_string());
    }

    configured
        .filter(|k| is_valid_key(k))
        .map(|k| k.trim().to_string())
}

fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5790);
        assert_eq!(config.upstream.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.upstream.model, "openai/gpt-4o-mini");
        assert_eq!(config.upstream.timeout_secs, 60);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.port, 5790);
        assert!(config.upstream.translate_api_key.is_none());
    }

    #[test]
    fn test_partial_upstream_section() {
        let config = TomlConfig::from_toml_str(
            r#"
            port = 8080

            [upstream]
            model = "openai/gpt-4o"
            drafter_api_key = "sk-drafter"
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.upstream.model, "openai/gpt-4o");
        assert_eq!(config.upstream.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.upstream.drafter_api_key.as_deref(), Some("sk-drafter"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("port = \"not a number\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("sk-123"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("   "));
    }
}
