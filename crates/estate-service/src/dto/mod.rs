//! Data Transfer Objects (DTOs).

mod property_dto;

pub use property_dto::*;
