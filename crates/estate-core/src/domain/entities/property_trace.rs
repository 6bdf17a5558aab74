//! Property trace entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in the sale history of a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyTrace {
    /// Identifier assigned by the store.
    pub id: String,

    /// Business identifier; may be empty.
    pub domain_id: String,

    /// Reference to the traced property, by either of its identifiers.
    pub property_key: String,

    pub sale_date: DateTime<Utc>,

    /// Label of the transaction.
    pub name: String,

    pub value: f64,

    pub tax: f64,
}
