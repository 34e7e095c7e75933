// src/domain/cart/mod.rs

pub mod entity;
pub mod invariants;
pub mod reducer;

pub use entity::{CartLine, CartState};
pub use invariants::validate_cart;
pub use reducer::CartAction;
