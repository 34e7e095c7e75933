// src/domain/wishlist/mod.rs

pub mod entity;
pub mod invariants;

pub use entity::WishlistEntry;
pub use invariants::validate_wishlist;
