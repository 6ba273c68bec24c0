//! # Souk Config - Configuration Management
//!
//! Handles configuration loading from files and environment variables.
//!
//! Everything mutable lives here and is constructed once at startup; the
//! signing secret and store handles are injected into the engine rather
//! than read from ambient globals, so tests can run with distinct secrets.

use std::path::Path;

use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// "development" or "production"; gates the placeholder-secret check
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            session: SessionConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

fn default_environment() -> String {
    "development".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret; must be overridden outside development
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Access token lifetime, minutes-to-hours scale
    #[serde(default = "default_access_ttl")]
    pub access_ttl_seconds: u64,

    /// Refresh token lifetime, days scale
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            issuer: default_issuer(),
            access_ttl_seconds: default_access_ttl(),
            refresh_ttl_seconds: default_refresh_ttl(),
        }
    }
}

fn default_jwt_secret() -> String {
    "dev-secret-change-in-production".to_string()
}

fn default_issuer() -> String {
    "souk-id".to_string()
}

fn default_access_ttl() -> u64 {
    900 // 15 minutes
}

fn default_refresh_ttl() -> u64 {
    604_800 // 7 days
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// "memory" or "redis"
    #[serde(default = "default_session_backend")]
    pub backend: String,

    #[serde(default)]
    pub redis_url: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: default_session_backend(),
            redis_url: None,
        }
    }
}

fn default_session_backend() -> String {
    "memory".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// "pretty", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

impl Config {
    /// Load from an optional YAML file plus `SOUK__`-prefixed environment
    /// overrides (e.g. `SOUK__AUTH__JWT_SECRET`)
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path));
        }

        let settings = builder
            .add_source(Environment::with_prefix("SOUK").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load configuration, falling back to defaults when the file is
    /// missing or malformed
    pub fn load_or_default(path: &str) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "using default configuration");
                Self::default()
            }
        }
    }

    /// Reject configurations that cannot be run safely
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ConfigError::Invalid("auth.jwt_secret must not be empty".into()));
        }
        // The shipped default secret is public knowledge; every token would
        // be forgeable with it
        if self.environment != "development" && self.auth.jwt_secret == default_jwt_secret() {
            return Err(ConfigError::Invalid(
                "auth.jwt_secret must be overridden outside development".into(),
            ));
        }
        if self.auth.access_ttl_seconds == 0 {
            return Err(ConfigError::Invalid("auth.access_ttl_seconds must be positive".into()));
        }
        if self.auth.refresh_ttl_seconds <= self.auth.access_ttl_seconds {
            return Err(ConfigError::Invalid(
                "auth.refresh_ttl_seconds must exceed auth.access_ttl_seconds".into(),
            ));
        }
        match self.session.backend.as_str() {
            "memory" => {}
            "redis" => {
                if self.session.redis_url.is_none() {
                    return Err(ConfigError::Invalid(
                        "session.redis_url is required for the redis backend".into(),
                    ));
                }
            }
            other => {
                return Err(ConfigError::Invalid(format!("unknown session backend: {other}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.auth.access_ttl_seconds, 900);
        assert_eq!(config.auth.refresh_ttl_seconds, 604_800);
        assert_eq!(config.session.backend, "memory");
    }

    #[test]
    fn test_placeholder_secret_rejected_in_production() {
        let mut config = Config::default();
        config.environment = "production".into();
        assert!(config.validate().is_err());

        config.auth.jwt_secret = "a-real-secret-set-by-the-operator".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_placeholder_secret_allowed_in_development() {
        let config = Config::default();
        assert_eq!(config.environment, "development");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let mut config = Config::default();
        config.auth.jwt_secret = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_refresh_ttl_must_exceed_access_ttl() {
        let mut config = Config::default();
        config.auth.refresh_ttl_seconds = config.auth.access_ttl_seconds;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_redis_backend_requires_url() {
        let mut config = Config::default();
        config.session.backend = "redis".into();
        assert!(config.validate().is_err());

        config.session.redis_url = Some("redis://localhost:6379".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let mut config = Config::default();
        config.session.backend = "memcached".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default("/nonexistent/config.yaml");
        assert_eq!(config.server.port, 8080);
    }
}
