// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod cart;
pub mod catalog;
pub mod ids;
pub mod session;
pub mod wishlist;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Identifiers
pub use ids::{ItemId, UserId};

// Cart Domain
pub use cart::{validate_cart, CartAction, CartLine, CartState};

// Catalog Domain
pub use catalog::{sample_catalog, CatalogItem};

// Session Domain
pub use session::{AuthSession, UserRecord};

// Wishlist Domain
pub use wishlist::{validate_wishlist, WishlistEntry};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
