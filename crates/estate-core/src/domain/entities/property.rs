//! Property entity.

use serde::{Deserialize, Serialize};

/// A listed property, read from the store as an immutable snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Identifier assigned by the store.
    pub id: String,

    /// Business identifier; may be empty for records created outside the
    /// listing workflow.
    pub domain_id: String,

    pub name: String,

    pub address: String,

    pub price: f64,

    /// Internal reference code used by the agency.
    pub code_internal: String,

    /// Construction year.
    pub year: i32,

    /// Reference to the owner, by either of the owner's identifiers.
    pub owner_key: String,
}

impl Property {
    /// Returns true if the owner reference is usable as a lookup key.
    #[must_use]
    pub fn has_owner(&self) -> bool {
        !self.owner_key.trim().is_empty()
    }
}
