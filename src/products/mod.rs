//! Products resource.
//!
//! # Data Flow
//! ```text
//! HTTP request
//!     → handlers.rs (parse id / body)
//!     → validator.rs (payload → ProductInput | ValidationError)
//!     → db gate wait → queries.rs (Statement) → QueryExecutor
//!     → model.rs (row → Product) → JSON response
//! ```

pub mod handlers;
pub mod model;
pub mod queries;
pub mod validator;

pub use model::{Product, ProductInput};
pub use validator::{validate_product, ValidationError};
