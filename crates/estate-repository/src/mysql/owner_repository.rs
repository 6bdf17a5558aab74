//! MySQL owner repository implementation.

use super::{distinct_keys, push_in_list};
use crate::{traits::record_batch, traits::OwnerRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::NaiveDate;
use estate_core::{identity::resolve_requested, EstateResult, Owner};
use shaku::Component;
use sqlx::{FromRow, MySql, QueryBuilder};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// MySQL owner repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = OwnerRepository)]
pub struct MySqlOwnerRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlOwnerRepository {
    /// Creates a new MySQL owner repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of an owner.
#[derive(Debug, FromRow)]
struct OwnerRow {
    id: String,
    domain_id: String,
    name: String,
    address: String,
    photo: String,
    birthday: NaiveDate,
}

impl From<OwnerRow> for Owner {
    fn from(row: OwnerRow) -> Self {
        Owner {
            id: row.id,
            domain_id: row.domain_id,
            name: row.name,
            address: row.address,
            photo: row.photo,
            birthday: row.birthday,
        }
    }
}

#[async_trait]
impl OwnerRepository for MySqlOwnerRepository {
    async fn get_owners_by_keys(&self, keys: &[String]) -> EstateResult<HashMap<String, Owner>> {
        let keys = distinct_keys(keys);
        if keys.is_empty() {
            return Ok(HashMap::new());
        }
        record_batch("owner", keys.len());
        debug!("Loading {} owners by key", keys.len());

        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(
            "SELECT id, domain_id, name, address, photo, birthday FROM owners WHERE id IN ",
        );
        push_in_list(&mut builder, &keys);
        builder.push(" OR domain_id IN ");
        push_in_list(&mut builder, &keys);

        let owners: Vec<Owner> = builder
            .build_query_as::<OwnerRow>()
            .fetch_all(self.pool.inner())
            .await?
            .into_iter()
            .map(Owner::from)
            .collect();

        Ok(resolve_requested(keys.iter().map(String::as_str), &owners))
    }
}
