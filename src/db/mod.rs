//! Database access subsystem.
//!
//! # Data Flow
//! ```text
//! startup
//!     → gate.rs (connect once, settle Ready(pool) | Failed(reason))
//!
//! handler
//!     → gate.rs wait() → QueryExecutor
//!     → executor.rs (Statement with @named typed parameters → ?N binds)
//!     → sqlx SQLite pool
//!     → rows / rows affected | DatabaseError
//! ```
//!
//! # Design Decisions
//! - The gate is an injected handle, not a global; failure is a value
//! - Parameters are always bound, never spliced into SQL text
//! - Pool internals are left to sqlx

pub mod executor;
pub mod gate;
pub mod schema;

pub use executor::{DatabaseError, QueryExecutor, SqlValue, Statement};
pub use gate::{ConnectionGate, GateError, GateStatus};
