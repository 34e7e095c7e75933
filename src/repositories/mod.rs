// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - NO cross-repository calls
// - Explicit SQL only

pub mod session_repository;
pub mod wishlist_cache_repository;

pub use session_repository::{
    session_keys, SessionRepository, SqliteSessionRepository, StoreNamespace,
};
pub use wishlist_cache_repository::{SqliteWishlistCacheRepository, WishlistCacheRepository};
