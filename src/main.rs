//! Region-aware redirect service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ http::request ──▶ geo::database ──▶ routing::policy
//!                     (axum + layers)  (client address)  (range scan)      (destination)
//!                                                                                │
//!     ◀────────────── http::response ◀───────────────────────────────────────────┘
//!     302 Location    (or plain-text diagnostic)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use region_redirect::config::{load_config, ServerConfig};
use region_redirect::http::HttpServer;
use region_redirect::lifecycle::{shutdown_signal, Shutdown};
use region_redirect::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(author, version, about = "Redirects clients to a region- and carrier-specific URL")]
struct Cli {
    /// Path to a TOML configuration file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    logging::init_logging(&config.observability);

    tracing::info!("region-redirect v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        database = %config.database.path.display(),
        area_marker = %config.catalog.area_marker,
        carriers = config.catalog.carriers.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
