//! # Souk Observe - Structured Logging
//!
//! Initializes `tracing` for the service. Error sites elsewhere never log
//! secrets (passwords, token strings); this crate only configures the
//! subscriber.

use tracing_subscriber::EnvFilter;

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable format with colors (for development)
    Pretty,
    /// Compact format without colors
    #[default]
    Compact,
    /// JSON format (for production)
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!("unknown log format: {other}")),
        }
    }
}

/// Configuration for logging behavior
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Environment filter (e.g. "info,souk=debug"); falls back to
    /// `RUST_LOG`, then to the given default level
    pub filter: Option<String>,
    pub default_level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: None,
            default_level: "info".to_string(),
        }
    }
}

/// Initialize structured logging
///
/// Call once at startup; a second call returns an error from the
/// subscriber registry.
pub fn init_logging(config: LogConfig) -> anyhow::Result<()> {
    let env_filter = if let Some(filter) = config.filter {
        EnvFilter::try_new(filter)?
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("{},souk=debug", config.default_level)))
    };

    let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter).with_target(true);

    match config.format {
        LogFormat::Pretty => subscriber.pretty().try_init().map_err(|e| anyhow::anyhow!(e))?,
        LogFormat::Compact => subscriber.compact().try_init().map_err(|e| anyhow::anyhow!(e))?,
        LogFormat::Json => subscriber.json().try_init().map_err(|e| anyhow::anyhow!(e))?,
    }

    Ok(())
}

/// Initialize with defaults (compact format, `RUST_LOG` respected)
pub fn init() -> anyhow::Result<()> {
    init_logging(LogConfig::default())
}
