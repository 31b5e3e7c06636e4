//! Startup orchestration.
//!
//! # Responsibilities
//! - Install the metrics exporter when enabled
//! - Open the connection gate in the background
//! - Bind the listener and serve until shutdown

use std::net::SocketAddr;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::ServiceConfig;
use crate::db::ConnectionGate;
use crate::http::HttpServer;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] BuildError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start every subsystem and serve until `shutdown` fires.
///
/// `config` is expected to have passed validation already. The receiver is
/// subscribed by the caller so a signal that lands during startup is kept.
pub async fn run(
    config: ServiceConfig,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let gate = ConnectionGate::open(&config.database);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config, gate);

    tracing::info!(
        address = %listener.local_addr()?,
        database = %server.config().database.url,
        "Listening for connections"
    );

    server.run(listener, shutdown).await?;
    Ok(())
}
