// src/lib.rs
// GameHatch - Storefront client core
//
// Architecture:
// - Domain-centric: Cart, catalog, session and wishlist logic lives in domains
// - Event-driven: Services announce state changes through an event bus
// - Explicit: No implicit behavior, no magic
// - Resilient: Remote shape drift degrades gracefully, never panics

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    sample_catalog,
    validate_cart,
    validate_wishlist,
    // Session
    AuthSession,
    // Cart
    CartAction,
    CartLine,
    CartState,
    // Catalog
    CatalogItem,
    DomainError,
    DomainResult,
    // Identifiers
    ItemId,
    UserId,
    UserRecord,
    // Wishlist
    WishlistEntry,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus, CatalogLoaded, DomainEvent, EventBus, EventLogEntry, SessionCleared,
    SessionEstablished, WishlistEntryAdded, WishlistEntryRemoved, WishlistSynced,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, create_pool_at, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    SessionRepository, SqliteSessionRepository, SqliteWishlistCacheRepository, StoreNamespace,
    WishlistCacheRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    AuthService, CatalogService, IdentityResolver, SignupAck, SignupRequest, WishlistService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse, ErrorType};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{BackendApi, BackendConfig, RestBackendClient, SignupPayload};
