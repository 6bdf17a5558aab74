//! MySQL property image repository implementation.

use super::{distinct_keys, push_in_list};
use crate::{traits::record_batch, traits::PropertyImageRepository, DatabasePoolInterface};
use async_trait::async_trait;
use estate_core::{EstateResult, PropertyImage};
use shaku::Component;
use sqlx::{FromRow, MySql, QueryBuilder};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// MySQL property image repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = PropertyImageRepository)]
pub struct MySqlPropertyImageRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlPropertyImageRepository {
    /// Creates a new MySQL property image repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    /// Enabled images for `keys`, ordered by property key then storage id.
    async fn fetch_enabled(&self, keys: &[String]) -> EstateResult<Vec<PropertyImage>> {
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(
            "SELECT id, domain_id, property_key, file, enabled FROM property_images \
             WHERE enabled = TRUE AND property_key IN ",
        );
        push_in_list(&mut builder, keys);
        builder.push(" ORDER BY property_key, id");

        let rows = builder
            .build_query_as::<PropertyImageRow>()
            .fetch_all(self.pool.inner())
            .await?;
        Ok(rows.into_iter().map(PropertyImage::from).collect())
    }
}

/// Database row representation of a property image.
#[derive(Debug, FromRow)]
struct PropertyImageRow {
    id: String,
    domain_id: String,
    property_key: String,
    file: String,
    enabled: bool,
}

impl From<PropertyImageRow> for PropertyImage {
    fn from(row: PropertyImageRow) -> Self {
        PropertyImage {
            id: row.id,
            domain_id: row.domain_id,
            property_key: row.property_key,
            file: row.file,
            enabled: row.enabled,
        }
    }
}

#[async_trait]
impl PropertyImageRepository for MySqlPropertyImageRepository {
    async fn get_first_enabled_images_by_property_keys(
        &self,
        keys: &[String],
    ) -> EstateResult<HashMap<String, PropertyImage>> {
        let keys = distinct_keys(keys);
        if keys.is_empty() {
            return Ok(HashMap::new());
        }
        record_batch("first_image", keys.len());
        debug!("Loading first images for {} property keys", keys.len());

        let mut first = HashMap::new();
        for image in self.fetch_enabled(&keys).await? {
            first.entry(image.property_key.clone()).or_insert(image);
        }
        Ok(first)
    }

    async fn get_enabled_images_by_property_keys(
        &self,
        keys: &[String],
    ) -> EstateResult<HashMap<String, Vec<PropertyImage>>> {
        let keys = distinct_keys(keys);
        if keys.is_empty() {
            return Ok(HashMap::new());
        }
        record_batch("images", keys.len());
        debug!("Loading image sets for {} property keys", keys.len());

        let mut grouped: HashMap<String, Vec<PropertyImage>> = HashMap::new();
        for image in self.fetch_enabled(&keys).await? {
            grouped
                .entry(image.property_key.clone())
                .or_default()
                .push(image);
        }
        Ok(grouped)
    }
}
