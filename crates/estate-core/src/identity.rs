//! Dual identifier resolution.
//!
//! Every entity carries a storage id and a domain id, and related records
//! may point at either one. All storage-id-first precedence rules live here
//! so callers never compare identifiers themselves.

use std::collections::HashMap;

use crate::{Owner, Property, PropertyImage, PropertyTrace};

/// An entity addressable by a storage id and an optional domain id.
pub trait DualKeyed {
    /// Identifier assigned by the store.
    fn storage_id(&self) -> &str;

    /// Business identifier; empty when the entity has none.
    fn domain_id(&self) -> &str;
}

macro_rules! impl_dual_keyed {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl DualKeyed for $ty {
                fn storage_id(&self) -> &str {
                    &self.id
                }

                fn domain_id(&self) -> &str {
                    &self.domain_id
                }
            }
        )+
    };
}

impl_dual_keyed!(Property, Owner, PropertyImage, PropertyTrace);

/// Returns true if `key` can be used for a lookup.
#[must_use]
pub fn is_usable_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Returns the keys an entity is cached and looked up under.
///
/// The storage id comes first, the domain id second. Blank identifiers are
/// skipped and a domain id equal to the storage id is not repeated.
#[must_use]
pub fn identity_keys<E: DualKeyed + ?Sized>(entity: &E) -> Vec<String> {
    let mut keys = Vec::with_capacity(2);
    for key in [entity.storage_id(), entity.domain_id()] {
        if is_usable_key(key) && !keys.iter().any(|k: &String| k == key) {
            keys.push(key.to_string());
        }
    }
    keys
}

/// Maps every requested key to the candidate it identifies.
///
/// A candidate whose storage id equals the key wins over one whose domain id
/// does. Requested keys that match nothing are absent from the result. Two
/// requested keys that identify the same entity each get their own entry.
#[must_use]
pub fn resolve_requested<'k, E, I>(requested: I, candidates: &[E]) -> HashMap<String, E>
where
    E: DualKeyed + Clone,
    I: IntoIterator<Item = &'k str>,
{
    let mut by_storage: HashMap<&str, &E> = HashMap::with_capacity(candidates.len());
    let mut by_domain: HashMap<&str, &E> = HashMap::with_capacity(candidates.len());
    for candidate in candidates {
        by_storage.entry(candidate.storage_id()).or_insert(candidate);
        if is_usable_key(candidate.domain_id()) {
            by_domain.entry(candidate.domain_id()).or_insert(candidate);
        }
    }

    requested
        .into_iter()
        .filter(|key| is_usable_key(key))
        .filter_map(|key| {
            by_storage
                .get(key)
                .or_else(|| by_domain.get(key))
                .map(|entity| (key.to_string(), (*entity).clone()))
        })
        .collect()
}

/// Reads `map` with storage-id-first precedence.
///
/// The domain id is consulted only when it is non-blank and the storage id
/// has no entry.
#[must_use]
pub fn lookup<'m, V>(
    map: &'m HashMap<String, V>,
    storage_id: &str,
    domain_id: &str,
) -> Option<&'m V> {
    map.get(storage_id).or_else(|| {
        if is_usable_key(domain_id) {
            map.get(domain_id)
        } else {
            None
        }
    })
}

/// [`lookup`] keyed by an entity's own identifiers.
#[must_use]
pub fn lookup_entity<'m, V, E: DualKeyed + ?Sized>(
    map: &'m HashMap<String, V>,
    entity: &E,
) -> Option<&'m V> {
    lookup(map, entity.storage_id(), entity.domain_id())
}
