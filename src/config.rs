//! Configuration for chat-gateway

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GatewayError, Result};

/// Main gateway configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Upstream completion API configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Quota tier limits
    #[serde(default)]
    pub quota: QuotaConfig,
    /// Usage store configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
}

/// Upstream completion API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// API base URL (e.g., "https://api.openai.com")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model name
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

/// Daily quota limits per tier
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuotaConfig {
    /// Daily requests for free-tier users
    #[serde(default = "default_free_limit")]
    pub free_daily_limit: i64,
    /// Daily requests for premium users
    #[serde(default = "default_premium_limit")]
    pub premium_daily_limit: i64,
}

/// Usage store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    #[serde(default = "default_database_url")]
    pub url: String,
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    150
}

fn default_free_limit() -> i64 {
    30
}

fn default_premium_limit() -> i64 {
    150
}

fn default_database_url() -> String {
    "sqlite://chat-gateway.db?mode=rwc".to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            free_daily_limit: default_free_limit(),
            premium_daily_limit: default_premium_limit(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Create a default development configuration
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                listen_addr: "0.0.0.0:8080".to_string(),
            },
            upstream: UpstreamConfig::default(),
            quota: QuotaConfig::default(),
            database: DatabaseConfig::default(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.listen_addr.is_empty() {
            return Err(GatewayError::Config("listen_addr is empty".to_string()));
        }

        if !self.upstream.base_url.starts_with("http") {
            return Err(GatewayError::Config(format!(
                "Invalid upstream base URL '{}'",
                self.upstream.base_url
            )));
        }

        if self.quota.free_daily_limit <= 0 || self.quota.premium_daily_limit <= 0 {
            return Err(GatewayError::Config(
                "Quota limits must be positive".to_string(),
            ));
        }

        if self.quota.free_daily_limit > self.quota.premium_daily_limit {
            return Err(GatewayError::Config(
                "Free limit cannot exceed premium limit".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::development()
    }
}
