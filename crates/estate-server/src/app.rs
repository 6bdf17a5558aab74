//! Application assembly.

use crate::di::{build_in_memory_module, build_mysql_module};
use crate::metrics::{metrics_router, PrometheusMetrics};
use axum::Router;
use estate_config::{AppConfig, StoreBackend};
use estate_core::EstateResult;
use estate_repository::{seed, InMemoryStore};
use estate_rest::create_router;
use estate_service::{CacheBackend, CacheTtls};
use std::sync::Arc;
use tracing::info;

/// Builds the full HTTP application for `config`.
///
/// The store backend selects the DI module; the cache backend and TTLs are
/// shared by both.
pub async fn build_app(config: &AppConfig, metrics: Option<PrometheusMetrics>) -> EstateResult<Router> {
    let cache = CacheBackend::from_config(&config.cache)?;
    let ttls = CacheTtls::from(&config.cache);
    info!(
        store = ?config.store.backend,
        cache = cache.name(),
        entity_ttl_secs = ttls.entity.as_secs(),
        query_ttl_secs = ttls.query.as_secs(),
        "Building dependency graph"
    );

    let router = match config.store.backend {
        StoreBackend::Memory => {
            let store = Arc::new(InMemoryStore::new());
            if config.store.seed_demo_data {
                seed::seed_demo_data(&store, config.store.seed_property_count);
            }
            let module = build_in_memory_module(store, cache, ttls);
            create_router(module.as_ref(), &config.server, &config.api)
        }
        StoreBackend::Mysql => {
            let module = build_mysql_module(&config.database, &config.store, cache, ttls).await?;
            create_router(module.as_ref(), &config.server, &config.api)
        }
    };

    Ok(match metrics {
        Some(metrics) => router.merge(metrics_router(metrics, &config.observability.metrics_path)),
        None => router,
    })
}
