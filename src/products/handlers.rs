//! Product request handlers.
//!
//! Each handler is straight-line: parse inputs, wait on the connection gate,
//! run its statements, shape the response. Any failure short-circuits into
//! an `ApiError`, which owns the status-code mapping.

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use sqlx::FromRow;

use crate::db::{DatabaseError, QueryExecutor, Statement};
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::products::model::{Product, ProductInput, ProductList, ProductMessage};
use crate::products::queries;
use crate::products::validator::parse_product;

pub const CREATED: &str = "Product created successfully.";
pub const UPDATED: &str = "Product updated successfully.";
pub const DELETED: &str = "Product deleted successfully.";

/// `GET /products`
pub async fn list_products(State(state): State<AppState>) -> Result<Json<ProductList>, ApiError> {
    let db = state.gate.wait().await?;
    let products = fetch_products(&db, &queries::select_all()).await?;

    Ok(Json(ProductList { products }))
}

/// `GET /products/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&raw_id)?;
    let db = state.gate.wait().await?;

    find_product(&db, id).await?.map(Json).ok_or(ApiError::NotFound)
}

/// `POST /products`
pub async fn create_product(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ProductMessage>, ApiError> {
    let input = parse_product(&body)?;
    let db = state.gate.wait().await?;

    let product = fetch_products(&db, &queries::insert(&input))
        .await?
        .into_iter()
        .next()
        .ok_or(DatabaseError::Sqlx(sqlx::Error::RowNotFound))?;

    tracing::info!(product_id = product.id, "Product created");
    Ok(Json(ProductMessage::new(CREATED, product)))
}

/// `PUT /products/{id}`
///
/// The existence check and the update are separate statements; a row deleted
/// in between is reported as not found.
pub async fn update_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<ProductMessage>, ApiError> {
    let id = parse_id(&raw_id)?;
    let input = parse_product(&body)?;
    let db = state.gate.wait().await?;

    if find_product(&db, id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let product = apply_update(&db, id, &input).await?;

    tracing::info!(product_id = id, "Product updated");
    Ok(Json(ProductMessage::new(UPDATED, product)))
}

/// Run the update and return the stored row; no row means it is gone.
async fn apply_update(db: &QueryExecutor, id: i64, input: &ProductInput) -> Result<Product, ApiError> {
    fetch_products(db, &queries::update(id, input))
        .await?
        .into_iter()
        .next()
        .ok_or(ApiError::NotFound)
}

/// `DELETE /products/{id}`
///
/// Responds with the row as it was before deletion.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ProductMessage>, ApiError> {
    let id = parse_id(&raw_id)?;
    let db = state.gate.wait().await?;

    let snapshot = find_product(&db, id).await?.ok_or(ApiError::NotFound)?;
    let removed = db.execute(&queries::delete(id)).await?;

    tracing::info!(product_id = id, rows = removed, "Product deleted");
    Ok(Json(ProductMessage::new(DELETED, snapshot)))
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::InvalidId(raw.to_string()))
}

async fn find_product(db: &QueryExecutor, id: i64) -> Result<Option<Product>, DatabaseError> {
    Ok(fetch_products(db, &queries::select_by_id(id))
        .await?
        .into_iter()
        .next())
}

async fn fetch_products(
    db: &QueryExecutor,
    statement: &Statement,
) -> Result<Vec<Product>, DatabaseError> {
    let rows = db.fetch_all(statement).await?;
    let products = rows
        .iter()
        .map(Product::from_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(products)
}
