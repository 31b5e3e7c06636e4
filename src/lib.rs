//! Products service library.

pub mod config;
pub mod db;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod products;

pub use config::schema::ServiceConfig;
pub use db::ConnectionGate;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
