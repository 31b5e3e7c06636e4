//! SQL statements for the `products` table.

use crate::db::{SqlValue, Statement};
use crate::products::model::ProductInput;

/// PRICE is DECIMAL(10,2).
const PRICE_PRECISION: u8 = 10;
const PRICE_SCALE: u8 = 2;

const SELECT_ALL: &str = "SELECT * FROM products";

const SELECT_BY_ID: &str = "SELECT * FROM products WHERE PRODUCTID = @id";

const INSERT: &str = "
    INSERT INTO products (PRODUCTNAME, PRICE, STOCK)
    VALUES (@name, @price, @stock)
    RETURNING *
";

const UPDATE: &str = "
    UPDATE products
    SET PRODUCTNAME = @name,
        PRICE = @price,
        STOCK = @stock
    WHERE PRODUCTID = @id
    RETURNING *
";

const DELETE: &str = "DELETE FROM products WHERE PRODUCTID = @id";

pub fn select_all() -> Statement {
    Statement::new(SELECT_ALL)
}

pub fn select_by_id(id: i64) -> Statement {
    Statement::new(SELECT_BY_ID).bind("id", SqlValue::Int(id))
}

pub fn insert(input: &ProductInput) -> Statement {
    bind_fields(Statement::new(INSERT), input)
}

pub fn update(id: i64, input: &ProductInput) -> Statement {
    bind_fields(Statement::new(UPDATE), input).bind("id", SqlValue::Int(id))
}

pub fn delete(id: i64) -> Statement {
    Statement::new(DELETE).bind("id", SqlValue::Int(id))
}

fn bind_fields(statement: Statement, input: &ProductInput) -> Statement {
    statement
        .bind("name", SqlValue::VarChar(input.productname.clone()))
        .bind(
            "price",
            SqlValue::decimal(input.price, PRICE_PRECISION, PRICE_SCALE),
        )
        .bind("stock", SqlValue::Int(input.stock))
}
