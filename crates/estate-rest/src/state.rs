//! Application state for Axum handlers.

use estate_config::ApiConfig;
use estate_service::PropertyService;
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub property_service: Arc<dyn PropertyService>,
    /// Paging defaults applied to incoming queries.
    pub api: Arc<ApiConfig>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(property_service: Arc<dyn PropertyService>, api: ApiConfig) -> Self {
        Self {
            property_service,
            api: Arc::new(api),
        }
    }

    /// Resolves the services from a Shaku module.
    pub fn from_module<M>(module: &M, api: ApiConfig) -> Self
    where
        M: Module + HasComponent<dyn PropertyService>,
    {
        Self::new(module.resolve(), api)
    }
}
