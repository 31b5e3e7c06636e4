//! Shared utilities for integration tests.

use products_api::config::{DatabaseConfig, ServiceConfig};
use products_api::{ConnectionGate, HttpServer, Shutdown};
use tokio::net::TcpListener;

/// A running service on an ephemeral port.
pub struct TestService {
    pub base_url: String,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestService {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestService {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Database settings for a private in-memory database with the table created.
pub fn memory_database() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        connect_timeout_secs: 5,
        create_table_if_missing: true,
    }
}

/// Start the service over a fresh in-memory database.
pub async fn start_service() -> TestService {
    start_service_with_gate(ConnectionGate::open(&memory_database())).await
}

/// Start the service over a caller-controlled gate.
pub async fn start_service_with_gate(gate: ConnectionGate) -> TestService {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = ServiceConfig::default();
    config.listener.bind_address = addr.to_string();
    config.observability.metrics_enabled = false;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, gate);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    TestService {
        base_url: format!("http://{}", addr),
        client,
        shutdown,
    }
}
