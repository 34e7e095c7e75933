// src/services/wishlist_service.rs
//
// Wishlist synchronization.
//
// Reconciles a per-user wishlist between the remote endpoint and the
// local cache, and enriches bare records with full catalog data so every
// UI surface (badge, wishlist page, cards) renders from one list.
//
// POLICY:
// - Reads degrade: a flaky wishlist endpoint yields an empty list and a
//   log line, never an error to the UI
// - Writes propagate: add/remove failures surface to the caller and leave
//   local state untouched
// - The remote list is the source of truth; the cache is only a cache
// - Resolutions overwrite in-memory state wholesale: last resolved wins

use chrono::Utc;
use serde_json::Value;
use std::sync::{Arc, RwLock};

use crate::domain::{ItemId, UserId, WishlistEntry};
use crate::error::{AppError, AppResult};
use crate::events::{
    EventBus, SessionCleared, WishlistEntryAdded, WishlistEntryRemoved, WishlistSynced,
};
use crate::integrations::backend::shapes::{
    entry_added_at, entry_as_full_item, normalize_wishlist_payload, resolve_entry_item_id,
};
use crate::integrations::BackendApi;
use crate::repositories::WishlistCacheRepository;
use crate::services::CatalogService;

pub struct WishlistService {
    backend: Arc<dyn BackendApi>,
    cache: Arc<dyn WishlistCacheRepository>,
    catalog: Arc<CatalogService>,
    event_bus: Arc<EventBus>,
    entries: Arc<RwLock<Vec<WishlistEntry>>>,
}

impl WishlistService {
    pub fn new(
        backend: Arc<dyn BackendApi>,
        cache: Arc<dyn WishlistCacheRepository>,
        catalog: Arc<CatalogService>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            backend,
            cache,
            catalog,
            event_bus,
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Wire this service to session events. A wishlist has no meaning
    /// without its owning user, so whenever the session is cleared
    /// (logout, purge, corruption) both the in-memory entries and the
    /// cache rows go with it.
    pub fn register_event_handlers(&self) {
        let entries = Arc::clone(&self.entries);
        let cache = Arc::clone(&self.cache);

        self.event_bus.subscribe::<SessionCleared, _>(move |event| {
            entries.write().unwrap().clear();
            if let Err(e) = cache.clear_all() {
                log::error!(
                    "failed to clear wishlist cache on session clear ({}): {}",
                    event.reason,
                    e
                );
            }
        });
    }

    /// Synchronize with the remote wishlist and return the enriched list.
    ///
    /// Never fails past this boundary; every degraded outcome resolves to
    /// an empty list.
    pub async fn fetch_wishlist(&self, user: Option<&UserId>) -> Vec<WishlistEntry> {
        // No identity: there is nothing to fetch and nothing cached is
        // meaningful, so drop all of it. Not an error.
        let Some(user) = user else {
            self.clear();
            if let Err(e) = self.cache.clear_all() {
                log::error!("failed to clear wishlist cache: {}", e);
            }
            return Vec::new();
        };

        // The enrichment join needs catalog data; load() is idempotent
        // and a no-op once the catalog is in memory.
        self.catalog.load().await;

        let payload = match self.backend.fetch_wishlist(user).await {
            Ok(payload) => payload,
            Err(e) => {
                // Degrade to "no saved items". The confirmed cache row is
                // kept: a transport failure says nothing about the list.
                log::warn!("wishlist fetch failed for {}: {}", user, e);
                self.clear();
                return Vec::new();
            }
        };

        let raw = match normalize_wishlist_payload(&payload) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("unrecognized wishlist payload for {}: {}", user, e);
                self.clear();
                return Vec::new();
            }
        };

        if raw.is_empty() {
            // Confirmed empty: delete the cache row outright. An absent
            // row distinguishes "fetched and empty" from "never fetched"
            // for code paths that check cache presence.
            if let Err(e) = self.cache.remove(user) {
                log::error!("failed to drop empty wishlist cache row: {}", e);
            }
            self.clear();
            self.event_bus.emit(WishlistSynced::new(user.clone(), 0));
            return Vec::new();
        }

        let enriched = self.enrich(user, &raw);

        *self.entries.write().unwrap() = enriched.clone();
        if let Err(e) = self.cache.store(user, &raw) {
            log::error!("failed to mirror wishlist cache for {}: {}", user, e);
        }

        self.event_bus
            .emit(WishlistSynced::new(user.clone(), enriched.len()));

        enriched
    }

    /// Join raw entries against the catalog. Entries that resolve no item
    /// id or no catalog match are dropped, not errored. Duplicate ids
    /// collapse to the first occurrence.
    fn enrich(&self, user: &UserId, raw: &[Value]) -> Vec<WishlistEntry> {
        let mut enriched: Vec<WishlistEntry> = Vec::with_capacity(raw.len());

        for entry in raw {
            let Some(id) = resolve_entry_item_id(entry) else {
                log::debug!("dropping wishlist entry without resolvable id");
                continue;
            };
            if enriched.iter().any(|existing| existing.id == id) {
                continue;
            }

            let item = match entry_as_full_item(entry) {
                Some(full) => full,
                None => match self.catalog.find_by_id(&id) {
                    Some(item) => item,
                    None => {
                        log::debug!("dropping wishlist entry {}: no catalog match", id);
                        continue;
                    }
                },
            };

            let added_at = entry_added_at(entry).unwrap_or_else(Utc::now);
            enriched.push(WishlistEntry {
                id,
                user_id: user.clone(),
                added_at,
                item,
            });
        }

        enriched
    }

    /// Add an item and re-synchronize.
    ///
    /// The re-sync replaces any optimistic guess about what the server
    /// persisted; id and shape drift between client and backend make a
    /// local append unreliable.
    pub async fn add_to_wishlist(&self, user: Option<&UserId>, item: &ItemId) -> AppResult<()> {
        let user = user.ok_or(AppError::NotAuthenticated)?;
        if !item.is_valid() {
            return Err(AppError::InvalidItem(item.to_string()));
        }

        self.backend
            .add_wishlist_entry(user, item, Utc::now())
            .await?;

        self.event_bus
            .emit(WishlistEntryAdded::new(user.clone(), item.clone()));

        self.fetch_wishlist(Some(user)).await;
        Ok(())
    }

    /// Remove an item: optimistic local filter for instant UI feedback,
    /// then a full re-fetch to reconcile any divergence.
    pub async fn remove_from_wishlist(&self, user: Option<&UserId>, item: &ItemId) -> AppResult<()> {
        let user = user.ok_or(AppError::NotAuthenticated)?;

        self.backend.remove_wishlist_entry(user, item).await?;

        self.apply_optimistic_removal(user, item);
        self.event_bus
            .emit(WishlistEntryRemoved::new(user.clone(), item.clone()));

        self.reconcile(user).await;
        Ok(())
    }

    /// Phase one of a removal: filter the in-memory list and the cache
    /// row without waiting for the next sync. Only called after the
    /// backend confirmed the write.
    pub fn apply_optimistic_removal(&self, user: &UserId, item: &ItemId) {
        self.entries
            .write()
            .unwrap()
            .retain(|entry| &entry.id != item);

        match self.cache.load(user) {
            Ok(Some(raw)) => {
                let filtered: Vec<Value> = raw
                    .into_iter()
                    .filter(|entry| resolve_entry_item_id(entry).as_ref() != Some(item))
                    .collect();

                let result = if filtered.is_empty() {
                    self.cache.remove(user)
                } else {
                    self.cache.store(user, &filtered)
                };
                if let Err(e) = result {
                    log::error!("failed to update wishlist cache for {}: {}", user, e);
                }
            }
            Ok(None) => {}
            Err(e) => log::error!("failed to read wishlist cache for {}: {}", user, e),
        }
    }

    /// Phase two: settle on whatever the backend now holds.
    pub async fn reconcile(&self, user: &UserId) -> Vec<WishlistEntry> {
        self.fetch_wishlist(Some(user)).await
    }

    /// Pure synchronous lookup against current in-memory state.
    pub fn is_in_wishlist(&self, item: &ItemId) -> bool {
        self.entries
            .read()
            .unwrap()
            .iter()
            .any(|entry| &entry.id == item)
    }

    /// Pure synchronous lookup against current in-memory state.
    pub fn get_wishlist_item(&self, item: &ItemId) -> Option<WishlistEntry> {
        self.entries
            .read()
            .unwrap()
            .iter()
            .find(|entry| &entry.id == item)
            .cloned()
    }

    pub fn entries(&self) -> Vec<WishlistEntry> {
        self.entries.read().unwrap().clone()
    }

    /// Drop in-memory state (used when the owning user logs out).
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }
}
