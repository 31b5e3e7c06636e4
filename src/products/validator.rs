//! Product payload validation.
//!
//! Fields are checked in schema order (`productname`, `price`, `stock`) and
//! the first violation wins. Unknown keys are ignored.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::products::model::ProductInput;

/// The first violated rule of a payload, serialized as the 400 body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub path: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub context: ValidationContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationContext {
    pub label: String,
    pub key: Option<String>,
}

impl ValidationError {
    fn field(key: &str, kind: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: vec![key.to_string()],
            kind: kind.to_string(),
            context: ValidationContext {
                label: key.to_string(),
                key: Some(key.to_string()),
            },
        }
    }

    /// The payload as a whole is not a JSON object.
    pub fn not_an_object() -> Self {
        Self {
            message: "\"value\" must be of type object".to_string(),
            path: Vec::new(),
            kind: "object.base".to_string(),
            context: ValidationContext {
                label: "value".to_string(),
                key: None,
            },
        }
    }

    fn required(key: &str) -> Self {
        Self::field(key, "any.required", format!("\"{key}\" is required"))
    }
}

/// Parse a raw request body and validate it.
pub fn parse_product(body: &[u8]) -> Result<ProductInput, ValidationError> {
    let payload: Value =
        serde_json::from_slice(body).map_err(|_| ValidationError::not_an_object())?;
    validate_product(&payload)
}

pub fn validate_product(payload: &Value) -> Result<ProductInput, ValidationError> {
    let object = payload.as_object().ok_or_else(ValidationError::not_an_object)?;

    let productname = string_field(object, "productname")?;
    let price = number_field(object, "price")?;
    let stock = integer_field(object, "stock")?;

    Ok(ProductInput {
        productname,
        price,
        stock,
    })
}

fn string_field(object: &Map<String, Value>, key: &str) -> Result<String, ValidationError> {
    match object.get(key) {
        None => Err(ValidationError::required(key)),
        Some(Value::String(s)) if s.is_empty() => Err(ValidationError::field(
            key,
            "string.empty",
            format!("\"{key}\" is not allowed to be empty"),
        )),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::field(
            key,
            "string.base",
            format!("\"{key}\" must be a string"),
        )),
    }
}

fn number_field(object: &Map<String, Value>, key: &str) -> Result<f64, ValidationError> {
    match object.get(key) {
        None => Err(ValidationError::required(key)),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| not_a_number(key)),
        Some(_) => Err(not_a_number(key)),
    }
}

/// Stock lands in an INTEGER column, so it must be whole and fit 32 bits to read back unchanged.
fn integer_field(object: &Map<String, Value>, key: &str) -> Result<i64, ValidationError> {
    let value = number_field(object, key)?;
    if value.fract() != 0.0 {
        return Err(ValidationError::field(
            key,
            "number.integer",
            format!("\"{key}\" must be an integer"),
        ));
    }
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(ValidationError::field(
            key,
            "number.range",
            format!("\"{key}\" must fit in a 32-bit integer"),
        ));
    }
    Ok(value as i64)
}

fn not_a_number(key: &str) -> ValidationError {
    ValidationError::field(key, "number.base", format!("\"{key}\" must be a number"))
}
