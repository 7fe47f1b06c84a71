//! Genrely Prediction Gateway - main entry point
//!
//! Accepts audio segment uploads and orchestrates the two-stage
//! preprocessing/inference pipeline against the collaborator services.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use genrely_gateway::api::{create_router, AppState};
use genrely_gateway::health::HealthProber;
use genrely_gateway::orchestrator::PredictionOrchestrator;
use genrely_gateway::GatewayConfig;

/// Command-line arguments for genrely-gateway
#[derive(Parser, Debug)]
#[command(name = "genrely-gateway")]
#[command(about = "Prediction gateway for the Genrely genre classifier")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "GENRELY_PORT")]
    port: Option<u16>,

    /// Path to a TOML configuration file
    #[arg(short, long, env = "GENRELY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "genrely_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = GatewayConfig::load(args.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.port = port;
    }
    config.validate().context("Invalid configuration")?;

    info!("Starting Genrely gateway v{}", env!("CARGO_PKG_VERSION"));
    info!("Audio service: {}", config.audio_service_url);
    info!("ML service: {}", config.ml_service_url);
    info!("Upload dir: {}", config.upload_dir.display());

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .context("Failed to create upload directory")?;

    let config = Arc::new(config);
    let state = AppState {
        orchestrator: Arc::new(
            PredictionOrchestrator::new(Arc::clone(&config))
                .context("Failed to initialize orchestrator")?,
        ),
        prober: Arc::new(HealthProber::new(&config).context("Failed to initialize health prober")?),
        config: Arc::clone(&config),
    };

    let app = create_router(state);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid bind address")?;

    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }
}
