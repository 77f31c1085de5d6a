//! Quote API: answers every HTTP request with a random quote as JSON.
//!
//! The binary in `main.rs` wires configuration, logging and the server together;
//! the pieces live here so integration tests can build the same router.

pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;

pub use catalog::{Catalog, CatalogError};
pub use config::AppConfig;
pub use error::Error;
pub use routes::create_router;
pub use state::AppState;
