//! Property image entity.

use serde::{Deserialize, Serialize};

/// An image attached to a property. Disabled images are never served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyImage {
    /// Identifier assigned by the store.
    pub id: String,

    /// Business identifier; may be empty.
    pub domain_id: String,

    /// Reference to the owning property, by either of its identifiers.
    pub property_key: String,

    /// File reference (URL or path).
    pub file: String,

    pub enabled: bool,
}
