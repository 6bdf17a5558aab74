//! MySQL property repository implementation.

use crate::{traits::PropertyRepository, DatabasePoolInterface};
use async_trait::async_trait;
use estate_core::{
    identity::is_usable_key, EstateResult, PageRequest, PagedResult, Property, PropertyFilter,
};
use shaku::Component;
use sqlx::{FromRow, MySql, QueryBuilder};
use std::sync::Arc;
use tracing::debug;

const PROPERTY_COLUMNS: &str =
    "SELECT id, domain_id, name, address, price, code_internal, year, owner_key FROM properties";

/// MySQL property repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = PropertyRepository)]
pub struct MySqlPropertyRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlPropertyRepository {
    /// Creates a new MySQL property repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    async fn page(
        &self,
        filter: &PropertyFilter,
        page: PageRequest,
    ) -> EstateResult<PagedResult<Property>> {
        let mut count: QueryBuilder<MySql> = QueryBuilder::new("SELECT COUNT(*) FROM properties");
        push_filter(&mut count, filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(self.pool.inner())
            .await?;

        let mut select: QueryBuilder<MySql> = QueryBuilder::new(PROPERTY_COLUMNS);
        push_filter(&mut select, filter);
        select.push(" ORDER BY id LIMIT ");
        select.push_bind(page.limit());
        select.push(" OFFSET ");
        select.push_bind(page.offset());

        let rows = select
            .build_query_as::<PropertyRow>()
            .fetch_all(self.pool.inner())
            .await?;

        let items = rows.into_iter().map(Property::from).collect();
        Ok(PagedResult::new(
            items,
            u64::try_from(total).unwrap_or(0),
            page,
        ))
    }
}

/// Database row representation of a property.
#[derive(Debug, FromRow)]
struct PropertyRow {
    id: String,
    domain_id: String,
    name: String,
    address: String,
    price: f64,
    code_internal: String,
    year: i32,
    owner_key: String,
}

impl From<PropertyRow> for Property {
    fn from(row: PropertyRow) -> Self {
        Property {
            id: row.id,
            domain_id: row.domain_id,
            name: row.name,
            address: row.address,
            price: row.price,
            code_internal: row.code_internal,
            year: row.year,
            owner_key: row.owner_key,
        }
    }
}

/// Escapes `LIKE` wildcards and wraps the term for a substring match.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn keyword(first: &mut bool) -> &'static str {
    if std::mem::replace(first, false) {
        " WHERE "
    } else {
        " AND "
    }
}

/// Appends a `WHERE` clause for every supplied criterion.
fn push_filter(builder: &mut QueryBuilder<'_, MySql>, filter: &PropertyFilter) {
    let mut first = true;

    if let Some(name) = filter.name_term() {
        builder.push(keyword(&mut first));
        builder.push("LOWER(name) LIKE ");
        builder.push_bind(like_pattern(name));
    }
    if let Some(address) = filter.address_term() {
        builder.push(keyword(&mut first));
        builder.push("LOWER(address) LIKE ");
        builder.push_bind(like_pattern(address));
    }
    if let Some(min) = filter.min_price {
        builder.push(keyword(&mut first));
        builder.push("price >= ");
        builder.push_bind(min);
    }
    if let Some(max) = filter.max_price {
        builder.push(keyword(&mut first));
        builder.push("price <= ");
        builder.push_bind(max);
    }
}

#[async_trait]
impl PropertyRepository for MySqlPropertyRepository {
    async fn get_paged(&self, page: PageRequest) -> EstateResult<PagedResult<Property>> {
        debug!("Paging properties, page: {}, size: {}", page.page, page.size);
        self.page(&PropertyFilter::default(), page).await
    }

    async fn search_paged(
        &self,
        filter: &PropertyFilter,
        page: PageRequest,
    ) -> EstateResult<PagedResult<Property>> {
        debug!(?filter, "Searching properties, page: {}, size: {}", page.page, page.size);
        self.page(filter, page).await
    }

    async fn find_by_id(&self, id: &str) -> EstateResult<Option<Property>> {
        if !is_usable_key(id) {
            return Ok(None);
        }
        debug!("Finding property by id: {}", id);

        // Storage id match sorts first.
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(PROPERTY_COLUMNS);
        builder.push(" WHERE id = ");
        builder.push_bind(id.to_string());
        builder.push(" OR domain_id = ");
        builder.push_bind(id.to_string());
        builder.push(" ORDER BY (id = ");
        builder.push_bind(id.to_string());
        builder.push(") DESC, id LIMIT 1");

        let row = builder
            .build_query_as::<PropertyRow>()
            .fetch_optional(self.pool.inner())
            .await?;
        Ok(row.map(Property::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Casa"), "%casa%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn test_push_filter_builds_where_clause() {
        let filter = PropertyFilter {
            name: Some("Casa".to_string()),
            address: Some("  ".to_string()),
            min_price: Some(10.0),
            max_price: None,
        };
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new("SELECT COUNT(*) FROM properties");
        push_filter(&mut builder, &filter);
        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM properties WHERE LOWER(name) LIKE ? AND price >= ?"
        );
    }

    #[test]
    fn test_push_filter_unrestricted() {
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new("SELECT COUNT(*) FROM properties");
        push_filter(&mut builder, &PropertyFilter::default());
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM properties");
    }
}
