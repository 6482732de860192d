//! Auth API server binary.
//!
//! Boots the HTTP adapter over the in-memory access control backend:
//! load configuration, initialize tracing and metrics, bind the
//! listener, serve until ctrl-c.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth_api::access::memory::InMemoryAccessControl;
use auth_api::access::AuthFlags;
use auth_api::config::{load_config, ServerConfig};
use auth_api::http::HttpServer;
use auth_api::lifecycle::Shutdown;

#[derive(Parser)]
#[command(name = "auth-api")]
#[command(about = "HTTP API server for the mesh access-control subsystem", long_about = None)]
struct Args {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("auth-api v0.1.0 starting");

    let args = Args::parse();
    let config = match args.config {
        Some(path) => load_config(&path)?,
        None => ServerConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        console_auth = config.auth.console_open,
        client_auth = config.auth.client_open,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Initialize metrics exporter
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            auth_api::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // The in-memory backend stands in for the real access control service.
    let access = Arc::new(InMemoryAccessControl::new(AuthFlags {
        console_open: config.auth.console_open,
        client_open: config.auth.client_open,
    }));

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, access);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
