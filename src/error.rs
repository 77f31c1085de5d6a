//! Top-level error type.
//!
//! Every failure in this service happens at startup: bad configuration, an
//! unusable catalog, logging setup, or the listener. Request handling has no
//! error path, so there is no `IntoResponse` impl here.

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::http::ServerError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error(transparent)]
    Server(#[from] ServerError),
}
