//! MySQL store adapters.

mod owner_repository;
mod property_image_repository;
mod property_repository;
mod property_trace_repository;

pub use owner_repository::*;
pub use property_image_repository::*;
pub use property_repository::*;
pub use property_trace_repository::*;

use estate_core::identity::is_usable_key;
use sqlx::{MySql, QueryBuilder};
use std::collections::BTreeSet;

/// Distinct usable keys, in a stable order for the `IN` list.
fn distinct_keys(keys: &[String]) -> Vec<String> {
    keys.iter()
        .filter(|k| is_usable_key(k))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Appends `(?, ?, ...)` binding every key.
fn push_in_list(builder: &mut QueryBuilder<'_, MySql>, keys: &[String]) {
    builder.push("(");
    let mut separated = builder.separated(", ");
    for key in keys {
        separated.push_bind(key.clone());
    }
    separated.push_unseparated(")");
}
