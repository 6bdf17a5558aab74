//! Entity-DTO mappers.
//!
//! Listing and detail DTOs combine a property with records resolved by
//! separate batch lookups, so they are built from parts rather than `From`.

use crate::dto::{OwnerDto, PropertyDetailDto, PropertyDto, PropertyTraceDto};
use estate_core::{Owner, Property, PropertyImage, PropertyTrace};

impl From<Owner> for OwnerDto {
    fn from(owner: Owner) -> Self {
        Self {
            id_owner: owner.id,
            name: owner.name,
            address: owner.address,
            photo: owner.photo,
            birthday: owner.birthday,
        }
    }
}

impl From<PropertyTrace> for PropertyTraceDto {
    fn from(trace: PropertyTrace) -> Self {
        Self {
            id_property_trace: trace.id,
            date_sale: trace.sale_date,
            name: trace.name,
            value: trace.value,
            tax: trace.tax,
        }
    }
}

impl PropertyDto {
    /// Stitches a property with its owner and first image.
    #[must_use]
    pub fn from_parts(property: Property, owner: Option<&Owner>, image: Option<&PropertyImage>) -> Self {
        Self {
            id_property: property.id,
            id_owner: property.owner_key,
            name: property.name,
            address: property.address,
            price: property.price,
            image: image.map(|i| i.file.clone()),
            owner_name: owner.map(|o| o.name.clone()),
        }
    }
}

impl PropertyDetailDto {
    /// Stitches a property with its owner, images and sale history.
    #[must_use]
    pub fn from_parts(
        property: Property,
        owner: Option<Owner>,
        images: Vec<PropertyImage>,
        traces: Vec<PropertyTrace>,
    ) -> Self {
        Self {
            id_property: property.id,
            id_owner: property.owner_key,
            name: property.name,
            address: property.address,
            price: property.price,
            code_internal: property.code_internal,
            year: property.year,
            images: images.into_iter().map(|i| i.file).collect(),
            owner: owner.map(OwnerDto::from),
            traces: traces.into_iter().map(PropertyTraceDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn property() -> Property {
        Property {
            id: "p-1".to_string(),
            domain_id: "PROP1".to_string(),
            name: "Casa moderna".to_string(),
            address: "Calle 5".to_string(),
            price: 250_000.0,
            code_internal: "INT-1".to_string(),
            year: 2010,
            owner_key: "OWNER001".to_string(),
        }
    }

    fn owner() -> Owner {
        Owner {
            id: "o-1".to_string(),
            domain_id: "OWNER001".to_string(),
            name: "Ana Lopez".to_string(),
            address: "Av. del Sol 1".to_string(),
            photo: "ana.jpg".to_string(),
            birthday: NaiveDate::from_ymd_opt(1985, 3, 4).unwrap(),
        }
    }

    #[test]
    fn test_listing_dto_from_parts() {
        let image = PropertyImage {
            id: "i-1".to_string(),
            domain_id: "IMG1".to_string(),
            property_key: "p-1".to_string(),
            file: "front.jpg".to_string(),
            enabled: true,
        };
        let dto = PropertyDto::from_parts(property(), Some(&owner()), Some(&image));

        assert_eq!(dto.id_property, "p-1");
        assert_eq!(dto.id_owner, "OWNER001");
        assert_eq!(dto.owner_name.as_deref(), Some("Ana Lopez"));
        assert_eq!(dto.image.as_deref(), Some("front.jpg"));
    }

    #[test]
    fn test_listing_dto_without_relations() {
        let dto = PropertyDto::from_parts(property(), None, None);
        assert!(dto.owner_name.is_none());
        assert!(dto.image.is_none());
    }

    #[test]
    fn test_detail_dto_from_parts() {
        let trace = PropertyTrace {
            id: "t-1".to_string(),
            domain_id: "TRACE1".to_string(),
            property_key: "PROP1".to_string(),
            sale_date: Utc.with_ymd_and_hms(2020, 5, 1, 12, 0, 0).unwrap(),
            name: "Compra inicial".to_string(),
            value: 200_000.0,
            tax: 10_000.0,
        };
        let dto = PropertyDetailDto::from_parts(property(), Some(owner()), Vec::new(), vec![trace]);

        assert_eq!(dto.code_internal, "INT-1");
        assert_eq!(dto.year, 2010);
        assert_eq!(dto.owner.as_ref().map(|o| o.id_owner.as_str()), Some("o-1"));
        assert!(dto.images.is_empty());
        assert_eq!(dto.traces[0].id_property_trace, "t-1");
    }

    #[test]
    fn test_dto_field_names() {
        let json = serde_json::to_value(PropertyDto::from_parts(property(), None, None)).unwrap();
        assert_eq!(json["id_property"], "p-1");
        assert_eq!(json["id_owner"], "OWNER001");
        assert!(json["image"].is_null());
    }
}
