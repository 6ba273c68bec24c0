//! # Souk Identity Server Binary
//!
//! Main entrypoint for the souk-id multi-tenant identity service.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use souk_api::AppState;
use souk_auth::{AuthEngine, TokenCodec};
use souk_bin::initialization;
use souk_config::Config;
use souk_observe::{LogConfig, LogFormat};
use souk_store::{
    MemorySessionStore, MemoryTenantStore, MemoryUserStore, RedisSessionStore, SessionStore,
};

#[derive(Parser, Debug)]
#[command(name = "souk-id")]
#[command(about = "Souk multi-tenant identity service", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load_or_default(&args.config);
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {e}");
        std::process::exit(1);
    }

    souk_observe::init_logging(LogConfig {
        format: config
            .observability
            .log_format
            .parse()
            .unwrap_or(LogFormat::Compact),
        filter: None,
        default_level: config.observability.log_level.clone(),
    })?;

    tracing::info!("Starting souk-id identity service");

    let sessions: Arc<dyn SessionStore> = match config.session.backend.as_str() {
        "redis" => {
            // validate() guarantees the url is present for this backend
            let url = config.session.redis_url.as_deref().unwrap_or_default();
            Arc::new(RedisSessionStore::connect(url).await?)
        }
        _ => {
            tracing::info!("Using in-memory session store");
            Arc::new(MemorySessionStore::new())
        }
    };

    let users = Arc::new(MemoryUserStore::new());
    let tenants = Arc::new(MemoryTenantStore::new());
    initialization::seed_dev_tenant(&tenants).await;

    let codec = TokenCodec::new(config.auth.jwt_secret.as_bytes(), &config.auth.issuer);
    let engine = AuthEngine::new(
        users,
        sessions,
        codec,
        Duration::from_secs(config.auth.access_ttl_seconds),
        Duration::from_secs(config.auth.refresh_ttl_seconds),
    )?;

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        engine: Arc::new(engine),
        tenants,
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, souk_api::router(state)).await?;

    Ok(())
}
