//! Runtime settings for the HTTP service
//!
//! Built from the bootstrap [`TomlConfig`] with credentials resolved from the
//! environment. Command-line overrides are applied by the binary.

use hptk_common::config::TomlConfig;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub upstream_base_url: String,
    pub upstream_model: String,
    pub upstream_timeout: Duration,
    pub translate_api_key: Option<String>,
    pub drafter_api_key: Option<String>,
    pub log_level: String,
}

impl ServerConfig {
    pub fn from_toml(config: &TomlConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            upstream_base_url: config.upstream.base_url.clone(),
            upstream_model: config.upstream.model.clone(),
            upstream_timeout: Duration::from_secs(config.upstream.timeout_secs),
            translate_api_key: config.translate_api_key(),
            drafter_api_key: config.drafter_api_key(),
            log_level: config.logging.level.clone(),
        }
    }

    /// Address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_toml(&TomlConfig::default())
    }
}
