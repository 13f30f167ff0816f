//! Application context shared by all request handlers via Axum state.

use std::sync::Arc;

use rc_core::config::Config;

use crate::catalog::{AssetResolver, StaticCatalog};

/// Cheaply cloneable: only holds `Arc`s to immutable data, so concurrent
/// requests never contend on anything but the filesystem.
#[derive(Clone)]
pub struct AppContext {
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
    /// Asset lookup used by every media route.
    pub catalog: Arc<dyn AssetResolver>,
}

impl AppContext {
    /// Build a context whose catalog is the config's static catalog.
    pub fn from_config(config: Config) -> Self {
        let catalog = StaticCatalog::from_config(&config.catalog);
        tracing::info!("Catalog loaded with {} asset(s)", catalog.len());
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
        }
    }

    /// Build a context around an externally supplied resolver.
    pub fn with_resolver(config: Config, catalog: Arc<dyn AssetResolver>) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
        }
    }
}
