// src/domain/catalog/mod.rs

pub mod entity;
pub mod sample;

pub use entity::CatalogItem;
pub use sample::sample_catalog;
