//! hptk-server - support toolkit HTTP service
//!
//! Serves the tool pages and their JSON endpoints, and proxies the translator
//! and email drafter to the chat-completion upstream.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hptk_common::config::{self, TomlConfig};
use hptk_server::{build_router, AppState, ServerConfig};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for hptk-server
#[derive(Parser, Debug)]
#[command(name = "hptk-server")]
#[command(about = "Support toolkit web service")]
#[command(version)]
struct Args {
    /// Configuration file
    #[arg(short, long, env = "HPTK_CONFIG")]
    config: Option<PathBuf>,

    /// Interface to bind
    #[arg(long, env = "HPTK_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "HPTK_PORT")]
    port: Option<u16>,

    /// Log level when RUST_LOG is not set
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = config::resolve_path(args.config.as_deref());
    let toml = TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let mut config = ServerConfig::from_toml(&toml);
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting hptk-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match config_path {
        Some(path) if path.exists() => info!("Configuration: {}", path.display()),
        Some(path) => warn!("Config file {} not found, using built-in defaults", path.display()),
        None => warn!("No config directory available, using built-in defaults"),
    }

    info!(
        "Upstream: {} (model {})",
        config.upstream_base_url, config.upstream_model
    );
    if config.translate_api_key.is_none() {
        warn!(
            "{} not set: /api/translate will answer 500",
            config::TRANSLATE_KEY_ENV
        );
    }
    if config.drafter_api_key.is_none() {
        warn!(
            "{} not set: /api/draft will answer 500",
            config::DRAFTER_KEY_ENV
        );
    }

    let state = AppState::new(&config).context("Failed to create upstream client")?;
    let app = build_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;

    info!("hptk-server listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
