//! Dependency injection module using Shaku.
//!
//! Two modules share the service and cache components and differ only in
//! the store adapters:
//! - `InMemoryModule`: repositories over a process-local [`InMemoryStore`]
//! - `MySqlModule`: repositories over a MySQL pool

use estate_config::{DatabaseConfig, StoreConfig};
use estate_core::EstateResult;
use estate_repository::{
    seed, DatabasePool, DatabasePoolInterface, DatabasePoolParameters, InMemoryOwnerRepository,
    InMemoryOwnerRepositoryParameters, InMemoryPropertyImageRepository,
    InMemoryPropertyImageRepositoryParameters, InMemoryPropertyRepository,
    InMemoryPropertyRepositoryParameters, InMemoryPropertyTraceRepository,
    InMemoryPropertyTraceRepositoryParameters, InMemoryStore, MySqlOwnerRepository,
    MySqlPropertyImageRepository, MySqlPropertyRepository, MySqlPropertyTraceRepository,
};
use estate_service::{
    CacheBackend, CacheTtls, LookasideCacheService, LookasideCacheServiceParameters,
    PropertyServiceImpl, PropertyServiceImplParameters,
};
use shaku::module;
use std::sync::Arc;
use tracing::info;

// In-memory deployment: demo data and tests.
module! {
    pub InMemoryModule {
        components = [
            InMemoryPropertyRepository,
            InMemoryOwnerRepository,
            InMemoryPropertyImageRepository,
            InMemoryPropertyTraceRepository,
            LookasideCacheService,
            PropertyServiceImpl,
        ],
        providers = [],
    }
}

// MySQL deployment.
module! {
    pub MySqlModule {
        components = [
            DatabasePool,
            MySqlPropertyRepository,
            MySqlOwnerRepository,
            MySqlPropertyImageRepository,
            MySqlPropertyTraceRepository,
            LookasideCacheService,
            PropertyServiceImpl,
        ],
        providers = [],
    }
}

/// Builds the in-memory module over `store`.
#[must_use]
pub fn build_in_memory_module(
    store: Arc<InMemoryStore>,
    cache: CacheBackend,
    ttls: CacheTtls,
) -> Arc<InMemoryModule> {
    let module = InMemoryModule::builder()
        .with_component_parameters::<InMemoryPropertyRepository>(
            InMemoryPropertyRepositoryParameters {
                store: store.clone(),
            },
        )
        .with_component_parameters::<InMemoryOwnerRepository>(InMemoryOwnerRepositoryParameters {
            store: store.clone(),
        })
        .with_component_parameters::<InMemoryPropertyImageRepository>(
            InMemoryPropertyImageRepositoryParameters {
                store: store.clone(),
            },
        )
        .with_component_parameters::<InMemoryPropertyTraceRepository>(
            InMemoryPropertyTraceRepositoryParameters { store },
        )
        .with_component_parameters::<LookasideCacheService>(LookasideCacheServiceParameters {
            backend: cache,
        })
        .with_component_parameters::<PropertyServiceImpl>(PropertyServiceImplParameters { ttls })
        .build();

    Arc::new(module)
}

/// Connects to MySQL, runs migrations, optionally seeds, and builds the
/// MySQL module.
pub async fn build_mysql_module(
    db_config: &DatabaseConfig,
    store_config: &StoreConfig,
    cache: CacheBackend,
    ttls: CacheTtls,
) -> EstateResult<Arc<MySqlModule>> {
    let db_pool = DatabasePool::connect(db_config).await?;

    if db_config.run_migrations {
        db_pool.run_migrations().await?;
    }
    if store_config.seed_demo_data
        && seed::seed_mysql(&db_pool, store_config.seed_property_count).await?
    {
        info!(
            properties = store_config.seed_property_count,
            "Seeded MySQL store with demo listings"
        );
    }

    let module = MySqlModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.into_inner(),
        })
        .with_component_parameters::<LookasideCacheService>(LookasideCacheServiceParameters {
            backend: cache,
        })
        .with_component_parameters::<PropertyServiceImpl>(PropertyServiceImplParameters { ttls })
        .build();

    Ok(Arc::new(module))
}
