//! MySQL property trace repository implementation.

use super::{distinct_keys, push_in_list};
use crate::{traits::record_batch, traits::PropertyTraceRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use estate_core::{EstateResult, PropertyTrace};
use shaku::Component;
use sqlx::{FromRow, MySql, QueryBuilder};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// MySQL property trace repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = PropertyTraceRepository)]
pub struct MySqlPropertyTraceRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlPropertyTraceRepository {
    /// Creates a new MySQL property trace repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a property trace.
#[derive(Debug, FromRow)]
struct PropertyTraceRow {
    id: String,
    domain_id: String,
    property_key: String,
    sale_date: DateTime<Utc>,
    name: String,
    value: f64,
    tax: f64,
}

impl From<PropertyTraceRow> for PropertyTrace {
    fn from(row: PropertyTraceRow) -> Self {
        PropertyTrace {
            id: row.id,
            domain_id: row.domain_id,
            property_key: row.property_key,
            sale_date: row.sale_date,
            name: row.name,
            value: row.value,
            tax: row.tax,
        }
    }
}

#[async_trait]
impl PropertyTraceRepository for MySqlPropertyTraceRepository {
    async fn get_traces_by_property_keys(
        &self,
        keys: &[String],
    ) -> EstateResult<HashMap<String, Vec<PropertyTrace>>> {
        let keys = distinct_keys(keys);
        if keys.is_empty() {
            return Ok(HashMap::new());
        }
        record_batch("traces", keys.len());
        debug!("Loading traces for {} property keys", keys.len());

        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(
            "SELECT id, domain_id, property_key, sale_date, name, value, tax \
             FROM property_traces WHERE property_key IN ",
        );
        push_in_list(&mut builder, &keys);
        builder.push(" ORDER BY property_key, sale_date, id");

        let rows = builder
            .build_query_as::<PropertyTraceRow>()
            .fetch_all(self.pool.inner())
            .await?;

        let mut grouped: HashMap<String, Vec<PropertyTrace>> = HashMap::new();
        for trace in rows.into_iter().map(PropertyTrace::from) {
            grouped
                .entry(trace.property_key.clone())
                .or_default()
                .push(trace);
        }
        Ok(grouped)
    }
}
