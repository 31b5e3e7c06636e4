//! Error-to-response mapping.
//!
//! # Responsibilities
//! - Map handler failures to HTTP status codes
//! - Keep database details server-side: logged, never returned
//!
//! # Status Codes
//! - 400: payload validation failure (detail body) or non-integer id
//! - 404: no product with that id
//! - 503: the connection gate failed
//! - 500: any query failure

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::{DatabaseError, GateError};
use crate::products::ValidationError;

pub const NOT_FOUND: &str = "Product not found";
pub const INVALID_ID: &str = "Invalid product id";
pub const UNAVAILABLE: &str = "Database unavailable";
pub const SERVER_ERROR: &str = "Server error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid product id: {0}")]
    InvalidId(String),

    #[error("product not found")]
    NotFound,

    #[error(transparent)]
    Unavailable(#[from] GateError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// `{ "message": ... }` body used by every non-validation error.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

fn message(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(MessageBody {
            message: message.to_string(),
        }),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(detail) => (StatusCode::BAD_REQUEST, Json(detail)).into_response(),
            ApiError::InvalidId(raw) => {
                tracing::debug!(id = %raw, "Rejected non-integer product id");
                message(StatusCode::BAD_REQUEST, INVALID_ID)
            }
            ApiError::NotFound => message(StatusCode::NOT_FOUND, NOT_FOUND),
            ApiError::Unavailable(e) => {
                tracing::error!(error = %e, "Database not available");
                message(StatusCode::SERVICE_UNAVAILABLE, UNAVAILABLE)
            }
            ApiError::Database(e) => {
                tracing::error!(error = %e, "Query failed");
                message(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::InvalidId("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::NotFound, StatusCode::NOT_FOUND),
            (
                ApiError::Unavailable(GateError::Failed("down".into())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ApiError::Database(DatabaseError::UnboundParameter("id".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
