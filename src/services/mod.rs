// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod auth_service;
pub mod catalog_service;
pub mod identity_resolver;
pub mod wishlist_service;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod auth_service_tests;

// Re-export all services and their types
pub use auth_service::{AuthService, SignupAck, SignupRequest};
pub use catalog_service::CatalogService;
pub use identity_resolver::IdentityResolver;
pub use wishlist_service::WishlistService;
