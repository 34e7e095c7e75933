// src/domain/catalog/entity.rs
use serde::{Deserialize, Serialize};

use crate::domain::ItemId;

/// A browsable, purchasable item in the storefront catalog.
///
/// Loosely structured on purpose: the backend omits most fields freely,
/// only id and title are required. The client never mutates catalog data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub platforms: Vec<String>,
}

impl CatalogItem {
    pub fn new(id: ItemId, title: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            title: title.into(),
            genre: None,
            price,
            image: None,
            rating: None,
            platforms: Vec::new(),
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_platforms(mut self, platforms: Vec<String>) -> Self {
        self.platforms = platforms;
        self
    }
}
