//! Product entity and its wire shapes.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// A persisted product as returned to clients.
///
/// Column names differ from the JSON field names; the mapping happens in
/// the `FromRow` impl below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub productname: String,
    pub price: f64,
    pub stock: i64,
}

impl<'r> FromRow<'r, SqliteRow> for Product {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("PRODUCTID")?,
            productname: row.try_get("PRODUCTNAME")?,
            price: decode_price(row)?,
            stock: row.try_get("STOCK")?,
        })
    }
}

// NUMERIC affinity stores whole prices as integers.
fn decode_price(row: &SqliteRow) -> Result<f64, sqlx::Error> {
    row.try_get::<f64, _>("PRICE")
        .or_else(|_| row.try_get::<i64, _>("PRICE").map(|price| price as f64))
}

/// A validated create/update payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub productname: String,
    pub price: f64,
    pub stock: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductList {
    pub products: Vec<Product>,
}

/// Body of successful create, update and delete responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductMessage {
    pub message: String,
    pub product: Product,
}

impl ProductMessage {
    pub fn new(message: &str, product: Product) -> Self {
        Self {
            message: message.to_string(),
            product,
        }
    }
}
