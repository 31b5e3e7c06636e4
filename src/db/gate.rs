//! Connection readiness gate.
//!
//! # States
//! ```text
//! Pending → Ready(pool)
//! Pending → Failed(reason)
//! ```
//!
//! The gate settles exactly once. Every handler waits on it before its first
//! query; waiters on a pending gate suspend until it settles, waiters on a
//! settled gate return immediately. A failed gate is reported to callers as
//! `GateError::Failed` so they can answer 503 instead of hanging.

use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use thiserror::Error;
use tokio::sync::watch;

use crate::config::DatabaseConfig;
use crate::db::executor::QueryExecutor;
use crate::db::schema::{ensure_products_table, products_table_exists};

const NOT_SETTLED: &str = "connection gate never settled";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("database connection failed: {0}")]
    Failed(Arc<str>),
}

#[derive(Debug, Clone)]
enum Readiness {
    Pending,
    Ready(SqlitePool),
    Failed(Arc<str>),
}

/// Snapshot of the gate, without the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateStatus {
    Pending,
    Ready,
    Failed(Arc<str>),
}

/// Shared, cloneable handle to the one-time readiness signal.
#[derive(Debug, Clone)]
pub struct ConnectionGate {
    tx: Arc<watch::Sender<Readiness>>,
}

impl ConnectionGate {
    /// A gate that has not settled yet.
    pub fn pending() -> Self {
        let (tx, _) = watch::channel(Readiness::Pending);
        Self { tx: Arc::new(tx) }
    }

    /// A gate already settled with a ready pool.
    pub fn ready(pool: SqlitePool) -> Self {
        let gate = Self::pending();
        gate.settle(Ok(pool));
        gate
    }

    /// A gate already settled as failed.
    pub fn failed(reason: impl Into<String>) -> Self {
        let gate = Self::pending();
        gate.settle(Err(reason.into()));
        gate
    }

    /// Start connecting in the background and return the pending gate.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn open(config: &DatabaseConfig) -> Self {
        let gate = Self::pending();
        let settler = gate.clone();
        let config = config.clone();

        tokio::spawn(async move {
            let outcome = connect(&config).await.map_err(|e| e.to_string());
            match &outcome {
                Ok(_) => tracing::info!(url = %config.url, "Database connected"),
                Err(reason) => tracing::error!(url = %config.url, error = %reason, "Database connection failed"),
            }
            settler.settle(outcome);
        });

        gate
    }

    /// Settle the gate. Only the first call has any effect; returns whether
    /// this call settled it.
    pub fn settle(&self, outcome: Result<SqlitePool, String>) -> bool {
        let next = match outcome {
            Ok(pool) => Readiness::Ready(pool),
            Err(reason) => Readiness::Failed(reason.into()),
        };

        self.tx.send_if_modified(|state| {
            if matches!(state, Readiness::Pending) {
                *state = next;
                true
            } else {
                false
            }
        })
    }

    /// Wait until the gate settles and hand out an executor on success.
    pub async fn wait(&self) -> Result<QueryExecutor, GateError> {
        let mut rx = self.tx.subscribe();
        // `self` owns the sender, so the channel stays open and `wait_for`
        // only returns once the state has left `Pending`.
        let settled = match rx.wait_for(|state| !matches!(state, Readiness::Pending)).await {
            Ok(state) => match &*state {
                Readiness::Ready(pool) => Ok(QueryExecutor::new(pool.clone())),
                Readiness::Failed(reason) => Err(GateError::Failed(reason.clone())),
                Readiness::Pending => Err(GateError::Failed(Arc::from(NOT_SETTLED))),
            },
            Err(_) => Err(GateError::Failed(Arc::from(NOT_SETTLED))),
        };
        settled
    }

    pub fn status(&self) -> GateStatus {
        match &*self.tx.borrow() {
            Readiness::Pending => GateStatus::Pending,
            Readiness::Ready(_) => GateStatus::Ready,
            Readiness::Failed(reason) => GateStatus::Failed(reason.clone()),
        }
    }
}

async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    // In-memory databases live only as long as their connection, so pooled
    // connections are never recycled.
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(&config.url)
        .await?;

    if config.create_table_if_missing {
        ensure_products_table(&pool).await?;
    } else if !products_table_exists(&pool).await? {
        tracing::warn!(
            url = %config.url,
            "Table 'products' does not exist; queries will fail until it is created \
             (set database.create_table_if_missing to bootstrap it)"
        );
    }

    Ok(pool)
}
