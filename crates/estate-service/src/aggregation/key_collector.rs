//! Related-record key collection for a page of properties.

use estate_core::{identity, Property};
use std::collections::BTreeSet;

/// Distinct keys needed to resolve the related records of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedKeys {
    /// Owner references, as stored on the properties.
    pub owner_keys: BTreeSet<String>,
    /// Both identifiers of every property.
    pub property_keys: BTreeSet<String>,
}

impl CollectedKeys {
    /// Returns true if nothing needs resolving.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owner_keys.is_empty() && self.property_keys.is_empty()
    }
}

/// Gathers batch lookup keys from property records.
pub struct BatchKeyCollector;

impl BatchKeyCollector {
    /// Collects owner and property keys, deduplicated and sorted.
    ///
    /// Images and traces may point at either property identifier, so both
    /// go into `property_keys`. Blank identifiers are dropped.
    #[must_use]
    pub fn collect(properties: &[Property]) -> CollectedKeys {
        let mut keys = CollectedKeys::default();
        for property in properties {
            if identity::is_usable_key(&property.owner_key) {
                keys.owner_keys.insert(property.owner_key.clone());
            }
            keys.property_keys.extend(identity::identity_keys(property));
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(id: &str, domain_id: &str, owner_key: &str) -> Property {
        Property {
            id: id.to_string(),
            domain_id: domain_id.to_string(),
            name: "Casa".to_string(),
            address: "Calle 1".to_string(),
            price: 100.0,
            code_internal: "INT-1".to_string(),
            year: 2000,
            owner_key: owner_key.to_string(),
        }
    }

    #[test]
    fn test_duplicate_owner_keys_collapse() {
        let records = vec![
            property("p-1", "PROP1", "OWNER001"),
            property("p-2", "PROP2", "OWNER001"),
            property("p-3", "PROP3", "o-2"),
        ];
        let keys = BatchKeyCollector::collect(&records);

        assert!(keys.owner_keys.len() <= records.len());
        assert_eq!(
            keys.owner_keys.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["OWNER001", "o-2"]
        );
    }

    #[test]
    fn test_property_keys_include_both_identifiers() {
        let keys = BatchKeyCollector::collect(&[property("p-1", "PROP1", "OWNER001")]);
        assert_eq!(
            keys.property_keys.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["PROP1", "p-1"]
        );
    }

    #[test]
    fn test_blank_identifiers_dropped() {
        let keys = BatchKeyCollector::collect(&[property("p-1", " ", "")]);
        assert!(keys.owner_keys.is_empty());
        assert_eq!(keys.property_keys.len(), 1);
    }

    #[test]
    fn test_empty_page() {
        assert!(BatchKeyCollector::collect(&[]).is_empty());
    }
}
