//! Bootstrap DDL for the `products` table.
//!
//! The DDL only runs when `database.create_table_if_missing` is set; the
//! table is otherwise owned by whoever provisions the database, and a missing
//! table is only reported.

use sqlx::SqlitePool;

pub const CREATE_PRODUCTS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS products (
        PRODUCTID   INTEGER PRIMARY KEY AUTOINCREMENT,
        PRODUCTNAME VARCHAR(255) NOT NULL,
        PRICE       REAL NOT NULL,
        STOCK       INTEGER NOT NULL
    )
";

pub async fn ensure_products_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_PRODUCTS_TABLE).execute(pool).await?;
    Ok(())
}

pub async fn products_table_exists(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    let found: Option<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'products'")
            .fetch_optional(pool)
            .await?;
    Ok(found.is_some())
}
