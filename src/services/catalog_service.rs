// src/services/catalog_service.rs
//
// In-memory catalog store.
//
// Loaded exactly once per application lifetime, from the remote "list all
// games" endpoint with the bundled sample catalog as fallback. Read by
// many consumers (wishlist join, search, product pages), written only by
// `load`. The read path never fails past this boundary: a broken fetch
// degrades to the bundled data and a log line.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::{sample_catalog, CatalogItem, ItemId};
use crate::events::{CatalogLoaded, EventBus};
use crate::integrations::backend::shapes::{normalize_catalog_item, normalize_list_payload};
use crate::integrations::BackendApi;

pub struct CatalogService {
    backend: Arc<dyn BackendApi>,
    event_bus: Arc<EventBus>,
    items: RwLock<Vec<CatalogItem>>,
    loaded: AtomicBool,
    // Serializes concurrent load() calls so a second caller awaits the
    // in-flight load instead of re-fetching.
    load_guard: tokio::sync::Mutex<()>,
}

impl CatalogService {
    pub fn new(backend: Arc<dyn BackendApi>, event_bus: Arc<EventBus>) -> Self {
        Self {
            backend,
            event_bus,
            items: RwLock::new(Vec::new()),
            loaded: AtomicBool::new(false),
            load_guard: tokio::sync::Mutex::new(()),
        }
    }

    /// Populate the catalog. Idempotent: later calls (including calls
    /// racing the first) return the already-loaded count without another
    /// fetch. Returns the number of items available afterwards.
    pub async fn load(&self) -> usize {
        if self.loaded.load(Ordering::Acquire) {
            return self.items.read().unwrap().len();
        }

        let _guard = self.load_guard.lock().await;

        // A racing call may have finished the load while we waited.
        if self.loaded.load(Ordering::Acquire) {
            return self.items.read().unwrap().len();
        }

        let (items, from_fallback) = match self.fetch_remote().await {
            Some(items) if !items.is_empty() => (items, false),
            Some(_) => {
                log::warn!("catalog endpoint returned no items, using bundled sample data");
                (sample_catalog(), true)
            }
            None => (sample_catalog(), true),
        };

        let count = items.len();
        *self.items.write().unwrap() = items;
        self.loaded.store(true, Ordering::Release);

        self.event_bus.emit(CatalogLoaded::new(count, from_fallback));
        count
    }

    async fn fetch_remote(&self) -> Option<Vec<CatalogItem>> {
        let payload = match self.backend.list_games().await {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("catalog fetch failed, using bundled sample data: {}", e);
                return None;
            }
        };

        let raw = match normalize_list_payload(&payload, &["data", "games", "items"]) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("unrecognized catalog payload, using bundled sample data: {}", e);
                return None;
            }
        };

        Some(raw.iter().filter_map(normalize_catalog_item).collect())
    }

    /// Synchronous lookup used by the wishlist enrichment join.
    pub fn find_by_id(&self, id: &ItemId) -> Option<CatalogItem> {
        self.items
            .read()
            .unwrap()
            .iter()
            .find(|item| &item.id == id)
            .cloned()
    }

    pub fn all(&self) -> Vec<CatalogItem> {
        self.items.read().unwrap().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// Forget everything and allow a fresh load. Explicit lifecycle hook
    /// for embedders and tests; not called during normal operation.
    pub fn reset(&self) {
        self.loaded.store(false, Ordering::Release);
        self.items.write().unwrap().clear();
    }
}
