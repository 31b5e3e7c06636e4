//! Parameterized query execution.
//!
//! # Responsibilities
//! - Hold a SQL template with `@name` placeholders and typed bind values
//! - Compile named placeholders to SQLite positional `?N` parameters
//! - Run the statement on the pool and surface failures as `DatabaseError`
//!
//! # Design Decisions
//! - A repeated placeholder name reuses its slot (`@id` twice binds once)
//! - Text inside single-quoted literals is never treated as a placeholder
//! - Decimal values are rounded to their scale before binding; values that
//!   overflow the declared precision are rejected instead of truncated

use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqlitePool, SqliteRow};
use thiserror::Error;

/// Errors raised by the query layer.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("no value bound for parameter @{0}")]
    UnboundParameter(String),

    #[error("value {value} does not fit DECIMAL({precision},{scale})")]
    DecimalOverflow { value: f64, precision: u8, scale: u8 },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// A typed value bound to a named placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
    VarChar(String),
    Decimal { value: f64, precision: u8, scale: u8 },
}

impl SqlValue {
    pub fn decimal(value: f64, precision: u8, scale: u8) -> Self {
        SqlValue::Decimal {
            value,
            precision,
            scale,
        }
    }

    /// Round decimals to their scale and check them against their precision.
    fn normalize(&self) -> Result<SqlValue, DatabaseError> {
        match *self {
            SqlValue::Decimal {
                value,
                precision,
                scale,
            } => {
                let overflow = DatabaseError::DecimalOverflow {
                    value,
                    precision,
                    scale,
                };
                if !value.is_finite() || scale > precision {
                    return Err(overflow);
                }

                let factor = 10f64.powi(i32::from(scale));
                let rounded = (value * factor).round() / factor;
                let limit = 10f64.powi(i32::from(precision - scale));
                if rounded.abs() >= limit {
                    return Err(overflow);
                }

                Ok(SqlValue::decimal(rounded, precision, scale))
            }
            _ => Ok(self.clone()),
        }
    }
}

/// A SQL template plus its named parameters.
#[derive(Debug, Clone)]
pub struct Statement {
    template: String,
    params: Vec<(String, SqlValue)>,
}

impl Statement {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            params: Vec::new(),
        }
    }

    /// Bind `value` to `@name`. Binding the same name again replaces the value.
    pub fn bind(mut self, name: impl Into<String>, value: SqlValue) -> Self {
        let name = name.into();
        match self.params.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.params.push((name, value)),
        }
        self
    }

    fn value_for(&self, name: &str) -> Option<&SqlValue> {
        self.params.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    fn compile(&self) -> Result<CompiledStatement, DatabaseError> {
        let template = self.template.as_str();
        let mut sql = String::with_capacity(template.len());
        let mut slots: Vec<&str> = Vec::new();
        let mut values = Vec::new();
        let mut in_literal = false;
        let mut chars = template.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            match c {
                '\'' => {
                    in_literal = !in_literal;
                    sql.push(c);
                }
                '@' if !in_literal => {
                    let start = i + c.len_utf8();
                    let mut end = start;
                    while let Some(&(j, next)) = chars.peek() {
                        if next.is_ascii_alphanumeric() || next == '_' {
                            end = j + next.len_utf8();
                            chars.next();
                        } else {
                            break;
                        }
                    }

                    let name = &template[start..end];
                    if name.is_empty() {
                        sql.push(c);
                        continue;
                    }

                    let slot = match slots.iter().position(|s| *s == name) {
                        Some(pos) => pos + 1,
                        None => {
                            let value = self
                                .value_for(name)
                                .ok_or_else(|| DatabaseError::UnboundParameter(name.to_string()))?;
                            values.push(value.normalize()?);
                            slots.push(name);
                            slots.len()
                        }
                    };
                    sql.push('?');
                    sql.push_str(&slot.to_string());
                }
                _ => sql.push(c),
            }
        }

        Ok(CompiledStatement { sql, values })
    }
}

/// A statement rewritten to positional parameters, values in slot order.
#[derive(Debug)]
struct CompiledStatement {
    sql: String,
    values: Vec<SqlValue>,
}

impl CompiledStatement {
    fn query(&self) -> Query<'_, Sqlite, SqliteArguments<'_>> {
        self.values
            .iter()
            .fold(sqlx::query(&self.sql), |query, value| match value {
                SqlValue::Int(v) => query.bind(*v),
                SqlValue::VarChar(v) => query.bind(v.as_str()),
                SqlValue::Decimal { value, .. } => query.bind(*value),
            })
    }
}

/// Runs statements against a ready connection pool.
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    pool: SqlitePool,
}

impl QueryExecutor {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run a statement and return its rows in result-set order.
    pub async fn fetch_all(&self, statement: &Statement) -> Result<Vec<SqliteRow>, DatabaseError> {
        let compiled = statement.compile()?;
        tracing::debug!(sql = %compiled.sql, params = compiled.values.len(), "Fetching rows");
        Ok(compiled.query().fetch_all(&self.pool).await?)
    }

    /// Run a statement and return the number of affected rows.
    pub async fn execute(&self, statement: &Statement) -> Result<u64, DatabaseError> {
        let compiled = statement.compile()?;
        tracing::debug!(sql = %compiled.sql, params = compiled.values.len(), "Executing statement");
        let result = compiled.query().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
