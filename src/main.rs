//! Products API server.
//!
//! # Architecture Overview
//!
//! ```text
//!     HTTP request        ┌────────────┐    ┌────────────┐    ┌──────────────┐
//!     ───────────────────▶│   server   │───▶│  dispatch  │───▶│   routing    │
//!                         │ (axum)     │    │            │    │   router     │
//!                         └────────────┘    └─────┬──────┘    └──────┬───────┘
//!                                                 │                  │
//!                                                 ▼                  ▼
//!     HTTP response       ┌────────────┐    ┌────────────┐    ┌──────────────┐
//!     ◀───────────────────│  envelope  │◀───│ error /    │◀───│   handler    │
//!                         │            │    │ response   │    │  (products)  │
//!                         └────────────┘    └────────────┘    └──────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use products_api::config::{self, ServiceConfig};
use products_api::http::{Dispatcher, HttpServer};
use products_api::observability::{logging, metrics};
use products_api::products;

#[derive(Parser)]
#[command(name = "products-api")]
#[command(about = "HTTP API serving the product endpoints", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ServiceConfig::default(),
    };

    logging::init_logging(&config.observability)?;

    tracing::info!(
        service = %config.service.name,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.limits.max_body_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Route table is built and frozen before any request is accepted.
    let router = products::router()?;
    tracing::info!(routes = router.routes().len(), "Route table built");
    let dispatcher = Arc::new(Dispatcher::new(config.service.name.clone(), router));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config, dispatcher);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
