// src/application/state.rs

use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::db::{create_pool_at, get_database_path, get_connection, initialize_database};
use crate::domain::{CartAction, CartState};
use crate::error::AppResult;
use crate::events::{create_event_bus, EventBus};
use crate::integrations::{BackendConfig, RestBackendClient};
use crate::repositories::{
    SessionRepository, SqliteSessionRepository, SqliteWishlistCacheRepository,
    WishlistCacheRepository,
};
use crate::services::{AuthService, CatalogService, IdentityResolver, WishlistService};

/// Application state shared with the embedding UI shell.
/// All services are Arc-wrapped for thread-safe sharing across handlers.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub auth_service: Arc<AuthService>,
    pub catalog_service: Arc<CatalogService>,
    pub wishlist_service: Arc<WishlistService>,
    pub identity_resolver: Arc<IdentityResolver>,
    cart: RwLock<CartState>,
}

impl AppState {
    /// Wire up the full stack against the default on-disk database.
    pub fn initialize(config: BackendConfig) -> AppResult<Self> {
        let db_path = get_database_path()?;
        Self::initialize_at(&db_path, config)
    }

    /// Same wiring over an explicit database path. Used by embedders
    /// that manage their own data directory, and by tests.
    pub fn initialize_at(db_path: &Path, config: BackendConfig) -> AppResult<Self> {
        // 1. INFRASTRUCTURE
        let event_bus = create_event_bus();
        let pool = Arc::new(create_pool_at(db_path)?);

        // Initialize schema (idempotent)
        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
        }

        let backend = Arc::new(RestBackendClient::new(config)?);

        // 2. REPOSITORIES
        let session_repo: Arc<dyn SessionRepository> =
            Arc::new(SqliteSessionRepository::new(pool.clone()));
        let wishlist_cache: Arc<dyn WishlistCacheRepository> =
            Arc::new(SqliteWishlistCacheRepository::new(pool.clone()));

        // 3. SERVICES
        let auth_service = Arc::new(AuthService::new(
            backend.clone(),
            session_repo,
            event_bus.clone(),
        ));
        let catalog_service = Arc::new(CatalogService::new(backend.clone(), event_bus.clone()));
        let wishlist_service = Arc::new(WishlistService::new(
            backend.clone(),
            wishlist_cache,
            catalog_service.clone(),
            event_bus.clone(),
        ));
        let identity_resolver = Arc::new(IdentityResolver::new(backend));

        // 4. EVENT HANDLER REGISTRATION (WIRING)
        // A cleared session takes the wishlist with it.
        wishlist_service.register_event_handlers();

        // 5. SESSION HYDRATION
        // Restores a persisted login; a corrupt store self-heals to
        // anonymous rather than failing startup.
        auth_service.hydrate()?;

        Ok(Self {
            event_bus,
            auth_service,
            catalog_service,
            wishlist_service,
            identity_resolver,
            cart: RwLock::new(CartState::empty()),
        })
    }

    pub fn cart(&self) -> CartState {
        self.cart.read().unwrap().clone()
    }

    /// Run one cart action through the reducer and return the new state.
    pub fn dispatch_cart(&self, action: CartAction) -> CartState {
        let mut cart = self.cart.write().unwrap();
        *cart = cart.apply(action);
        cart.clone()
    }

    pub fn clear_cart(&self) -> CartState {
        self.dispatch_cart(CartAction::ClearCart)
    }
}
