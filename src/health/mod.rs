//! Readiness reporting.
//!
//! # States
//! ```text
//! gate Pending → 503 { "status": "pending" }
//! gate Ready   → 200 { "status": "ready" }
//! gate Failed  → 503 { "status": "failed" }
//! ```
//!
//! # Design Decisions
//! - Reads the gate without waiting on it
//! - Failure reasons are logged, not returned

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::db::GateStatus;
use crate::http::server::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
}

/// `GET /health`
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let (status, label) = match state.gate.status() {
        GateStatus::Ready => (StatusCode::OK, "ready"),
        GateStatus::Pending => (StatusCode::SERVICE_UNAVAILABLE, "pending"),
        GateStatus::Failed(reason) => {
            tracing::warn!(error = %reason, "Readiness check: database connection failed");
            (StatusCode::SERVICE_UNAVAILABLE, "failed")
        }
    };

    (
        status,
        Json(HealthReport {
            status: label.to_string(),
        }),
    )
}
