//! Shared application state for request handlers.

use std::sync::Arc;

use crate::catalog::{Catalog, CatalogError};
use crate::config::AppConfig;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Contains the application configuration and the quote catalog. Both are
/// read-only after startup; the catalog synchronizes its own generator.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<Catalog>,
}

impl AppState {
    /// Creates a new application state from an already-built catalog.
    pub fn new(config: AppConfig, catalog: Catalog) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
        }
    }

    /// Builds the catalog described by `config.quotes` and wraps both.
    ///
    /// Fails when the configured catalog is empty or has blank entries, so the
    /// server never starts without something to serve.
    pub fn from_config(config: AppConfig) -> Result<Self, CatalogError> {
        let catalog = Catalog::new(config.quotes.catalog.iter().cloned(), config.quotes.seed)?;
        Ok(Self::new(config, catalog))
    }
}
