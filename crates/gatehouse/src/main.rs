//! # Gatehouse - Portcullis HTTP Facade
//!
//! Issues and verifies stateless CAPTCHA challenges over HTTP. No
//! session store backs this service: every outstanding challenge lives
//! inside the signed token the client holds, so instances can be added
//! or removed freely as long as they share the signing secret.
//!
//! ## Architecture
//! ```text
//! Client → Gatehouse → portcullis (in-process, stateless)
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use gatehouse::config::AppConfig;
use gatehouse::routes;
use gatehouse::state::AppState;

/// Gatehouse - stateless CAPTCHA challenge service
#[derive(Parser, Debug)]
#[command(name = "gatehouse")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/gatehouse.toml")]
    config: String,

    /// Listen address (overrides config)
    #[arg(short, long, env = "LISTEN_ADDR")]
    listen: Option<String>,

    /// Token signing secret (overrides config)
    #[arg(long, env = "GATEHOUSE_SECRET")]
    secret: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before argument parsing so env-backed flags see it
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level, args.json_logs)?;

    info!("🛡️ Starting Gatehouse v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = AppConfig::load(&args.config)?;
    info!("📋 Configuration loaded from {}", args.config);

    // Apply CLI overrides
    if let Some(listen) = args.listen {
        config.listen_addr = listen;
    }
    if let Some(secret) = args.secret {
        config.captcha.secret = secret;
    }
    if config.captcha.secret.is_empty() {
        tracing::warn!(
            "No signing secret configured; tokens use the built-in placeholder (do not deploy like this)"
        );
    }

    // Initialize application state
    let state = AppState::new(config.clone());

    // Build router
    let app = routes::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("🚀 Gatehouse listening on {}", config.listen_addr);

    // Handle graceful shutdown
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("🛑 Shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("Server error")?;

    info!("👋 Gatehouse shutdown complete");
    Ok(())
}

/// Initialize structured logging with tracing
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .init();
    }

    Ok(())
}
