//! Products CRUD service.
//!
//! A small REST service over a single `products` table, built with Tokio,
//! Axum and sqlx.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http server ──▶ products handlers ──▶ validator
//!                     (request id,          │
//!                      trace, timeout,      ▼
//!                      body limit)    connection gate ──▶ query executor ──▶ SQLite
//!                                           │                   │
//!     Client Response                       ▼                   ▼
//!     ◀────────────── http response ◀── ApiError / JSON ◀──── rows
//!
//!     Cross-cutting: config, observability (logs + metrics), lifecycle, health
//! ```

use std::path::PathBuf;

use clap::Parser;

use products_api::config::load_config;
use products_api::lifecycle::{self, signals, Shutdown};
use products_api::observability::logging;

#[derive(Parser)]
#[command(name = "products-api")]
#[command(about = "REST service for the products table", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "products-api starting"
    );

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    signals::forward_signals(shutdown);

    lifecycle::run(config, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
