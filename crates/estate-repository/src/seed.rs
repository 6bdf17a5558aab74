//! Deterministic demo listings.
//!
//! Generates owners, properties, images and traces that exercise the dual
//! identifier scheme: some properties point at their owner by domain id,
//! some images and traces point at their property by domain id, and about
//! one image in five is disabled. The same count always yields the same
//! records.

use crate::{DatabasePoolInterface, InMemoryStore};
use chrono::{DateTime, NaiveDate, Utc};
use estate_core::{EstateResult, Owner, Property, PropertyImage, PropertyTrace};
use sqlx::{MySql, QueryBuilder};
use tracing::info;
use uuid::Uuid;

const FIRST_NAMES: &[&str] = &[
    "Juan", "Maria", "Carlos", "Ana", "Luis", "Sofia", "Jorge", "Lucia", "Miguel", "Elena",
    "Pedro", "Laura", "Diego", "Camila", "Andres", "Valentina",
];
const LAST_NAMES: &[&str] = &[
    "Perez", "Garcia", "Lopez", "Martinez", "Rodriguez", "Hernandez", "Gonzalez", "Sanchez",
    "Ramirez", "Torres", "Flores", "Rivera", "Gomez", "Diaz", "Vargas", "Cruz",
];
const STREETS: &[&str] = &[
    "Av. Principal", "Calle Secundaria", "Boulevard Central", "Av. Costera",
    "Calle de las Flores", "Av. del Sol", "Calle 5", "Calle 20", "Av. Reforma", "Av. Libertad",
];
const CITIES: &[&str] = &[
    "Ciudad de Mexico", "Guadalajara", "Monterrey", "Cancun", "Puebla", "Merida", "Toluca",
];
const KINDS: &[&str] = &["Casa", "Departamento", "Apartamento", "Loft", "Condominio"];
const ADJECTIVES: &[&str] = &["moderno", "amplio", "luminoso", "acogedor"];
const IMAGE_CATEGORIES: &[&str] = &["house", "building", "apartment", "interior", "home"];
const TRACE_LABELS: &[&str] = &[
    "Compra inicial",
    "Remodelacion mayor",
    "Ajuste de avaluo",
    "Venta parcial",
    "Renovacion de hipoteca",
    "Cambio de propietario",
];
const TAX_RATES: &[f64] = &[0.05, 0.07, 0.08, 0.1];

const IMAGES_PER_PROPERTY: usize = 3;
const LATEST_SALE_YEAR: i32 = 2024;
/// Rows per multi-row `INSERT`, well below MySQL's placeholder limit.
const INSERT_CHUNK: usize = 500;

/// A generated set of listings.
#[derive(Debug, Clone, Default)]
pub struct DemoData {
    pub owners: Vec<Owner>,
    pub properties: Vec<Property>,
    pub images: Vec<PropertyImage>,
    pub traces: Vec<PropertyTrace>,
}

/// Storage ids look like store-assigned UUIDs; the namespace keeps each
/// collection's ids distinct and the sequence keeps them ordered.
fn storage_id(namespace: u64, sequence: usize) -> String {
    Uuid::from_u64_pair(namespace, sequence as u64)
        .simple()
        .to_string()
}

fn pick<'a>(values: &[&'a str], n: usize) -> &'a str {
    values[n % values.len()]
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn sale_date(year: i32, n: usize) -> Option<DateTime<Utc>> {
    let month = u32::try_from(n % 12).ok()? + 1;
    let day = u32::try_from(n % 28).ok()? + 1;
    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(12, 0, 0)
        .map(|dt| dt.and_utc())
}

/// Generates `property_count` properties with their related records.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_precision_loss)]
pub fn generate_demo_data(property_count: usize) -> DemoData {
    let owner_count = (property_count / 3).max(1);
    let mut data = DemoData::default();

    for i in 1..=owner_count {
        data.owners.push(Owner {
            id: storage_id(0x0a, i),
            domain_id: format!("OWNER{i:04}"),
            name: format!("{} {}", pick(FIRST_NAMES, i * 7), pick(LAST_NAMES, i * 3)),
            address: format!("{} {}, {}", pick(STREETS, i), (i * 37) % 999 + 1, pick(CITIES, i)),
            photo: format!("https://loremflickr.com/200/200/person?random={i}"),
            birthday: NaiveDate::from_ymd_opt(
                1970 + (i * 7 % 35) as i32,
                (i * 5 % 12) as u32 + 1,
                (i * 11 % 28) as u32 + 1,
            )
            .unwrap_or(NaiveDate::MIN),
        });
    }

    let mut image_seq = 0;
    let mut trace_seq = 0;
    for i in 1..=property_count {
        let owner = &data.owners[(i * 13) % owner_count];
        // Every fourth property references its owner by domain id.
        let owner_key = if i % 4 == 0 {
            owner.domain_id.clone()
        } else {
            owner.id.clone()
        };
        let year = 1990 + (i * 13 % 35) as i32;
        let price = ((50 + (i * 37) % 451) * 1000) as f64;

        let property = Property {
            id: storage_id(0x0b, i),
            domain_id: format!("PROP{i:05}"),
            name: format!("{} {}", pick(KINDS, i), pick(ADJECTIVES, i / KINDS.len())),
            address: format!("{} {}, {}", pick(STREETS, i * 3), (i * 53) % 999 + 1, pick(CITIES, i * 5)),
            price,
            code_internal: format!("INT-{i:05}"),
            year,
            owner_key,
        };

        for _ in 0..IMAGES_PER_PROPERTY {
            image_seq += 1;
            data.images.push(PropertyImage {
                id: storage_id(0x0c, image_seq),
                domain_id: format!("IMG{image_seq:06}"),
                property_key: if image_seq % 3 == 0 {
                    property.domain_id.clone()
                } else {
                    property.id.clone()
                },
                file: format!(
                    "https://loremflickr.com/800/600/{}?random={image_seq}",
                    pick(IMAGE_CATEGORIES, image_seq)
                ),
                enabled: image_seq % 5 != 4,
            });
        }

        for t in 0..=(i % 3) {
            trace_seq += 1;
            let sale_year = (year + (t as i32) * 2).min(LATEST_SALE_YEAR);
            let Some(sale_date) = sale_date(sale_year, i + t) else {
                continue;
            };
            let value = round2(price * (0.85 + ((i + t) % 7) as f64 * 0.05));
            data.traces.push(PropertyTrace {
                id: storage_id(0x0d, trace_seq),
                domain_id: format!("TRACE{trace_seq:06}"),
                property_key: if trace_seq % 2 == 0 {
                    property.domain_id.clone()
                } else {
                    property.id.clone()
                },
                sale_date,
                name: pick(TRACE_LABELS, trace_seq).to_string(),
                value,
                tax: round2(value * TAX_RATES[trace_seq % TAX_RATES.len()]),
            });
        }

        data.properties.push(property);
    }

    data
}

/// Loads `data` into an in-memory store.
pub fn seed_in_memory(store: &InMemoryStore, data: DemoData) {
    for owner in data.owners {
        store.insert_owner(owner);
    }
    for property in data.properties {
        store.insert_property(property);
    }
    for image in data.images {
        store.insert_image(image);
    }
    for trace in data.traces {
        store.insert_trace(trace);
    }
}

/// Seeds an empty in-memory store with `property_count` demo properties.
///
/// Returns false when the store already held data.
pub fn seed_demo_data(store: &InMemoryStore, property_count: usize) -> bool {
    if !store.is_empty() {
        return false;
    }
    seed_in_memory(store, generate_demo_data(property_count));
    info!(properties = store.property_count(), "Seeded in-memory store with demo listings");
    true
}

/// Seeds the MySQL tables when `properties` is empty.
///
/// Returns false when the store already held data.
pub async fn seed_mysql(pool: &dyn DatabasePoolInterface, property_count: usize) -> EstateResult<bool> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM properties")
        .fetch_one(pool.inner())
        .await?;
    if existing > 0 || property_count == 0 {
        return Ok(false);
    }

    let data = generate_demo_data(property_count);
    let mut tx = pool.inner().begin().await?;

    for chunk in data.owners.chunks(INSERT_CHUNK) {
        let mut owners: QueryBuilder<MySql> =
            QueryBuilder::new("INSERT INTO owners (id, domain_id, name, address, photo, birthday) ");
        owners.push_values(chunk, |mut row, owner| {
            row.push_bind(owner.id.clone())
                .push_bind(owner.domain_id.clone())
                .push_bind(owner.name.clone())
                .push_bind(owner.address.clone())
                .push_bind(owner.photo.clone())
                .push_bind(owner.birthday);
        });
        owners.build().execute(&mut *tx).await?;
    }

    for chunk in data.properties.chunks(INSERT_CHUNK) {
        let mut properties: QueryBuilder<MySql> = QueryBuilder::new(
            "INSERT INTO properties (id, domain_id, name, address, price, code_internal, year, owner_key) ",
        );
        properties.push_values(chunk, |mut row, property| {
            row.push_bind(property.id.clone())
                .push_bind(property.domain_id.clone())
                .push_bind(property.name.clone())
                .push_bind(property.address.clone())
                .push_bind(property.price)
                .push_bind(property.code_internal.clone())
                .push_bind(property.year)
                .push_bind(property.owner_key.clone());
        });
        properties.build().execute(&mut *tx).await?;
    }

    for chunk in data.images.chunks(INSERT_CHUNK) {
        let mut images: QueryBuilder<MySql> = QueryBuilder::new(
            "INSERT INTO property_images (id, domain_id, property_key, file, enabled) ",
        );
        images.push_values(chunk, |mut row, image| {
            row.push_bind(image.id.clone())
                .push_bind(image.domain_id.clone())
                .push_bind(image.property_key.clone())
                .push_bind(image.file.clone())
                .push_bind(image.enabled);
        });
        images.build().execute(&mut *tx).await?;
    }

    for chunk in data.traces.chunks(INSERT_CHUNK) {
        let mut traces: QueryBuilder<MySql> = QueryBuilder::new(
            "INSERT INTO property_traces (id, domain_id, property_key, sale_date, name, value, tax) ",
        );
        traces.push_values(chunk, |mut row, trace| {
            row.push_bind(trace.id.clone())
                .push_bind(trace.domain_id.clone())
                .push_bind(trace.property_key.clone())
                .push_bind(trace.sale_date)
                .push_bind(trace.name.clone())
                .push_bind(trace.value)
                .push_bind(trace.tax);
        });
        traces.build().execute(&mut *tx).await?;
    }

    tx.commit().await?;
    info!(properties = data.properties.len(), "Seeded MySQL store with demo listings");
    Ok(true)
}
