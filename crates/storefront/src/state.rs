//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{CatalogClient, CatalogError};
use crate::config::StorefrontConfig;
use crate::spaces::SpaceRegistry;

/// Error creating application state.
#[derive(Debug, thiserror::Error)]
pub enum StateInitError {
    #[error("failed to build catalog client: {0}")]
    Catalog(#[from] CatalogError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the space registry and the commerce API client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    registry: SpaceRegistry,
    catalog: CatalogClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog HTTP client cannot be constructed.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateInitError> {
        let registry = SpaceRegistry::new(
            config.spaces.dir.clone(),
            Duration::from_secs(config.spaces.cache_ttl_secs),
        );
        let catalog = CatalogClient::new(&config.catalog)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                registry,
                catalog,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the space registry.
    #[must_use]
    pub fn registry(&self) -> &SpaceRegistry {
        &self.inner.registry
    }

    /// Get a reference to the commerce API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }
}
