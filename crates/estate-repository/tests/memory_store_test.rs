//! Integration tests for the in-memory store adapter and the demo seeder.

use chrono::{NaiveDate, TimeZone, Utc};
use estate_core::{
    identity::identity_keys, Owner, PageRequest, Property, PropertyFilter, PropertyImage,
    PropertyTrace,
};
use estate_repository::seed::{generate_demo_data, seed_demo_data, seed_in_memory};
use estate_repository::{
    InMemoryOwnerRepository, InMemoryPropertyImageRepository, InMemoryPropertyRepository,
    InMemoryPropertyTraceRepository, InMemoryStore, OwnerRepository, PropertyImageRepository,
    PropertyRepository, PropertyTraceRepository,
};
use std::sync::Arc;

fn property(id: &str, domain_id: &str, name: &str, price: f64, owner_key: &str) -> Property {
    Property {
        id: id.to_string(),
        domain_id: domain_id.to_string(),
        name: name.to_string(),
        address: format!("{name} street"),
        price,
        code_internal: format!("INT-{id}"),
        year: 2001,
        owner_key: owner_key.to_string(),
    }
}

fn owner(id: &str, domain_id: &str, name: &str) -> Owner {
    Owner {
        id: id.to_string(),
        domain_id: domain_id.to_string(),
        name: name.to_string(),
        address: "Av. Principal 1".to_string(),
        photo: "photo.jpg".to_string(),
        birthday: NaiveDate::from_ymd_opt(1985, 6, 15).unwrap(),
    }
}

fn image(id: &str, property_key: &str, enabled: bool) -> PropertyImage {
    PropertyImage {
        id: id.to_string(),
        domain_id: format!("IMG-{id}"),
        property_key: property_key.to_string(),
        file: format!("{id}.jpg"),
        enabled,
    }
}

fn trace(id: &str, property_key: &str, year: i32) -> PropertyTrace {
    PropertyTrace {
        id: id.to_string(),
        domain_id: String::new(),
        property_key: property_key.to_string(),
        sale_date: Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap(),
        name: format!("sale {year}"),
        value: 1000.0,
        tax: 50.0,
    }
}

fn store() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    store.insert_owner(owner("o-1", "OWNER001", "Ana Perez"));
    store.insert_owner(owner("o-2", "", "Luis Diaz"));
    store.insert_property(property("p-1", "P1", "Casa moderna", 150_000.0, "o-1"));
    store.insert_property(property("p-2", "P2", "Loft amplio", 90_000.0, "OWNER001"));
    store.insert_property(property("p-3", "", "casa de campo", 300_000.0, "o-2"));
    store.insert_image(image("i-2", "p-1", true));
    store.insert_image(image("i-1", "p-1", false));
    store.insert_image(image("i-3", "p-1", true));
    store.insert_image(image("i-4", "P2", true));
    store.insert_trace(trace("t-1", "p-1", 2020));
    store.insert_trace(trace("t-2", "p-1", 2010));
    store
}

#[tokio::test]
async fn test_get_paged_orders_by_storage_id() {
    let repo = InMemoryPropertyRepository::new(store());

    let page = repo.get_paged(PageRequest::new(1, 2)).await.unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 2);
    let ids: Vec<_> = page.items.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p-1", "p-2"]);

    let page = repo.get_paged(PageRequest::new(2, 2)).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, "p-3");
}

#[tokio::test]
async fn test_page_beyond_end_is_empty_with_total() {
    let repo = InMemoryPropertyRepository::new(store());
    let page = repo.get_paged(PageRequest::new(9, 20)).await.unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total, 3);
}

#[tokio::test]
async fn test_search_filters_combine() {
    let repo = InMemoryPropertyRepository::new(store());

    let page = repo
        .search_paged(&PropertyFilter::by_name("CASA"), PageRequest::first())
        .await
        .unwrap();
    assert_eq!(page.total, 2);

    let filter = PropertyFilter {
        name: Some("casa".to_string()),
        max_price: Some(150_000.0),
        ..PropertyFilter::default()
    };
    let page = repo.search_paged(&filter, PageRequest::first()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, "p-1");
}

#[tokio::test]
async fn test_find_by_id_prefers_storage_id() {
    let repo = InMemoryPropertyRepository::new(store());

    assert_eq!(repo.find_by_id("p-2").await.unwrap().unwrap().id, "p-2");
    assert_eq!(repo.find_by_id("P1").await.unwrap().unwrap().id, "p-1");
    assert!(repo.find_by_id("missing").await.unwrap().is_none());
    assert!(repo.find_by_id("").await.unwrap().is_none());
}

#[tokio::test]
async fn test_owners_resolve_under_every_requested_key() {
    let repo = InMemoryOwnerRepository::new(store());
    let keys = vec![
        "o-1".to_string(),
        "OWNER001".to_string(),
        "o-2".to_string(),
        "nobody".to_string(),
        String::new(),
    ];

    let owners = repo.get_owners_by_keys(&keys).await.unwrap();
    assert_eq!(owners.len(), 3);
    assert_eq!(owners["o-1"], owners["OWNER001"]);
    assert_eq!(owners["o-2"].name, "Luis Diaz");
}

#[tokio::test]
async fn test_empty_key_set_returns_empty_map() {
    let repo = InMemoryOwnerRepository::new(store());
    assert!(repo.get_owners_by_keys(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_first_enabled_image_is_lowest_enabled_id() {
    let repo = InMemoryPropertyImageRepository::new(store());
    let keys = vec!["p-1".to_string(), "P1".to_string(), "P2".to_string()];

    let first = repo
        .get_first_enabled_images_by_property_keys(&keys)
        .await
        .unwrap();
    assert_eq!(first["p-1"].id, "i-2");
    assert_eq!(first["P2"].id, "i-4");
    assert!(!first.contains_key("P1"));

    let all = repo.get_enabled_images_by_property_keys(&keys).await.unwrap();
    let ids: Vec<_> = all["p-1"].iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["i-2", "i-3"]);
}

#[tokio::test]
async fn test_traces_ordered_by_sale_date() {
    let repo = InMemoryPropertyTraceRepository::new(store());
    let traces = repo
        .get_traces_by_property_keys(&["p-1".to_string()])
        .await
        .unwrap();
    let years: Vec<_> = traces["p-1"].iter().map(|t| t.name.as_str()).collect();
    assert_eq!(years, vec!["sale 2010", "sale 2020"]);
}

#[test]
fn test_demo_data_is_deterministic() {
    let a = generate_demo_data(30);
    let b = generate_demo_data(30);
    assert_eq!(a.properties, b.properties);
    assert_eq!(a.images, b.images);
    assert_eq!(a.owners.len(), 10);
    assert_eq!(a.properties.len(), 30);
}

#[test]
fn test_demo_data_exercises_both_identifier_forms() {
    let data = generate_demo_data(30);

    let owner_ids: Vec<_> = data.owners.iter().map(|o| o.id.as_str()).collect();
    let owner_domain_ids: Vec<_> = data.owners.iter().map(|o| o.domain_id.as_str()).collect();
    assert!(data.properties.iter().any(|p| owner_ids.contains(&p.owner_key.as_str())));
    assert!(data.properties.iter().any(|p| owner_domain_ids.contains(&p.owner_key.as_str())));

    let property_domain_ids: Vec<_> = data.properties.iter().map(|p| p.domain_id.clone()).collect();
    assert!(data.images.iter().any(|i| property_domain_ids.contains(&i.property_key)));
    assert!(data.images.iter().any(|i| !i.enabled));
    assert!(data.images.iter().filter(|i| i.enabled).count() * 10 >= data.images.len() * 7);

    for property in &data.properties {
        assert_eq!(identity_keys(property).len(), 2);
    }
}

#[tokio::test]
async fn test_seeded_store_resolves_every_owner() {
    let store = Arc::new(InMemoryStore::new());
    assert!(seed_demo_data(&store, 24));
    assert!(!seed_demo_data(&store, 24));

    let properties = InMemoryPropertyRepository::new(store.clone())
        .get_paged(PageRequest::new(1, 100))
        .await
        .unwrap();
    assert_eq!(properties.total, 24);

    let keys: Vec<String> = properties.items.iter().map(|p| p.owner_key.clone()).collect();
    let owners = InMemoryOwnerRepository::new(store)
        .get_owners_by_keys(&keys)
        .await
        .unwrap();
    for property in &properties.items {
        assert!(owners.contains_key(&property.owner_key));
    }
}

#[test]
fn test_seed_in_memory_replaces_by_storage_id() {
    let store = InMemoryStore::new();
    let data = generate_demo_data(6);
    seed_in_memory(&store, data.clone());
    seed_in_memory(&store, data);
    assert_eq!(store.property_count(), 6);
}
