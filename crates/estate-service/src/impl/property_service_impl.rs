//! Property service implementation.

use crate::aggregation::{
    load_through_cache, BatchKeyCollector, FirstImageLoader, ImageSetLoader, OwnerLoader,
    TraceLoader,
};
use crate::cache::{cache_keys, LookasideCache, LookasideCacheExt};
use crate::dto::{PropertyDetailDto, PropertyDto, PropertyPage};
use crate::property_service::PropertyService;
use async_trait::async_trait;
use estate_config::CacheConfig;
use estate_core::{
    identity, EstateResult, PageRequest, PagedResult, Property, PropertyFilter, ValidateExt,
};
use estate_repository::{
    OwnerRepository, PropertyImageRepository, PropertyRepository, PropertyTraceRepository,
};
use shaku::Component;
use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Lifetimes of cached entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    /// Owners, images and traces.
    pub entity: Duration,
    /// Composed pages.
    pub query: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            entity: Duration::from_secs(30 * 60),
            query: Duration::from_secs(5 * 60),
        }
    }
}

impl From<&CacheConfig> for CacheTtls {
    fn from(config: &CacheConfig) -> Self {
        Self {
            entity: config.entity_ttl(),
            query: config.query_ttl(),
        }
    }
}

/// Property service backed by the repositories and the lookaside cache.
#[derive(Component)]
#[shaku(interface = PropertyService)]
pub struct PropertyServiceImpl {
    #[shaku(inject)]
    property_repository: Arc<dyn PropertyRepository>,
    #[shaku(inject)]
    owner_repository: Arc<dyn OwnerRepository>,
    #[shaku(inject)]
    image_repository: Arc<dyn PropertyImageRepository>,
    #[shaku(inject)]
    trace_repository: Arc<dyn PropertyTraceRepository>,
    #[shaku(inject)]
    cache: Arc<dyn LookasideCache>,
    ttls: CacheTtls,
}

impl PropertyServiceImpl {
    /// Creates a new property service.
    pub fn new(
        property_repository: Arc<dyn PropertyRepository>,
        owner_repository: Arc<dyn OwnerRepository>,
        image_repository: Arc<dyn PropertyImageRepository>,
        trace_repository: Arc<dyn PropertyTraceRepository>,
        cache: Arc<dyn LookasideCache>,
        ttls: CacheTtls,
    ) -> Self {
        Self {
            property_repository,
            owner_repository,
            image_repository,
            trace_repository,
            cache,
            ttls,
        }
    }

    /// Serves a page from the query cache, or reads, composes and caches it.
    async fn cached_page<F>(&self, query_key: String, records: F) -> EstateResult<PropertyPage>
    where
        F: Future<Output = EstateResult<PagedResult<Property>>> + Send,
    {
        let cached = self
            .cache
            .get::<PropertyPage>(cache_keys::QUERY, &query_key)
            .await
            .filter(|page| !page.is_empty());
        if let Some(page) = cached {
            debug!(key = %query_key, "Query cache hit");
            return Ok(page);
        }

        let records = records.await?;
        let page = self.compose_listings(records).await?;

        if page.is_empty() {
            debug!(key = %query_key, "Empty page, not caching");
        } else {
            self.cache
                .put(cache_keys::QUERY, &query_key, &page, self.ttls.query)
                .await;
        }
        Ok(page)
    }

    /// Resolves owners and first images for a page of properties.
    async fn compose_listings(&self, records: PagedResult<Property>) -> EstateResult<PropertyPage> {
        let keys = BatchKeyCollector::collect(&records.items);
        let owner_loader = OwnerLoader::new(self.owner_repository.as_ref());
        let image_loader = FirstImageLoader::new(self.image_repository.as_ref());

        let (owners, images) = tokio::try_join!(
            load_through_cache(&owner_loader, self.cache.as_ref(), &keys.owner_keys, self.ttls.entity),
            load_through_cache(&image_loader, self.cache.as_ref(), &keys.property_keys, self.ttls.entity),
        )?;

        Ok(records.map(|property| {
            let owner = owners.get(&property.owner_key);
            let image = identity::lookup_entity(&images, &property);
            PropertyDto::from_parts(property, owner, image)
        }))
    }
}

#[async_trait]
impl PropertyService for PropertyServiceImpl {
    async fn get_page(&self, page: PageRequest) -> EstateResult<PropertyPage> {
        debug!(page = page.page, size = page.size, "Listing properties");
        let key = cache_keys::page_query(page);
        self.cached_page(key, self.property_repository.get_paged(page))
            .await
    }

    async fn search(&self, filter: PropertyFilter, page: PageRequest) -> EstateResult<PropertyPage> {
        filter.validate_request()?;
        debug!(?filter, page = page.page, size = page.size, "Searching properties");

        let key = cache_keys::search_query(&filter, page);
        self.cached_page(key, self.property_repository.search_paged(&filter, page))
            .await
    }

    async fn get_detail(&self, id: &str) -> EstateResult<Option<PropertyDetailDto>> {
        let Some(property) = self.property_repository.find_by_id(id).await? else {
            debug!(id, "Property not found");
            return Ok(None);
        };

        let keys = BatchKeyCollector::collect(std::slice::from_ref(&property));
        let owner_loader = OwnerLoader::new(self.owner_repository.as_ref());
        let image_loader = ImageSetLoader::new(self.image_repository.as_ref());
        let trace_loader = TraceLoader::new(self.trace_repository.as_ref());
        let cache = self.cache.as_ref();
        let ttl = self.ttls.entity;

        let (owners, images, traces) = tokio::try_join!(
            load_through_cache(&owner_loader, cache, &keys.owner_keys, ttl),
            load_through_cache(&image_loader, cache, &keys.property_keys, ttl),
            load_through_cache(&trace_loader, cache, &keys.property_keys, ttl),
        )?;

        let owner = owners.get(&property.owner_key).cloned();
        let images = identity::lookup_entity(&images, &property)
            .cloned()
            .unwrap_or_default();
        let traces = identity::lookup_entity(&traces, &property)
            .cloned()
            .unwrap_or_default();

        info!(id = %property.id, "Property detail composed");
        Ok(Some(PropertyDetailDto::from_parts(property, owner, images, traces)))
    }

    async fn get_property_image(&self, id: &str) -> EstateResult<Option<String>> {
        let Some(property) = self.property_repository.find_by_id(id).await? else {
            return Ok(None);
        };

        let keys: BTreeSet<String> = identity::identity_keys(&property).into_iter().collect();
        let loader = FirstImageLoader::new(self.image_repository.as_ref());
        let images = load_through_cache(&loader, self.cache.as_ref(), &keys, self.ttls.entity).await?;

        Ok(identity::lookup_entity(&images, &property).map(|image| image.file.clone()))
    }
}

impl std::fmt::Debug for PropertyServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyServiceImpl")
            .field("ttls", &self.ttls)
            .finish_non_exhaustive()
    }
}
