//! Owner entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The owner of one or more properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    /// Identifier assigned by the store.
    pub id: String,

    /// Business identifier; may be empty.
    pub domain_id: String,

    pub name: String,

    pub address: String,

    /// Reference to the owner's photo.
    pub photo: String,

    pub birthday: NaiveDate,
}
