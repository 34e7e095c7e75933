// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{ItemId, UserId};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// SESSION EVENTS
// ============================================================================

/// Emitted when a login completes and the session is persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEstablished {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Option<UserId>,
    pub username: Option<String>,
}

impl SessionEstablished {
    pub fn new(user_id: Option<UserId>, username: Option<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            username,
        }
    }
}

impl DomainEvent for SessionEstablished {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "SessionEstablished"
    }
}

/// Emitted when the local session is cleared (logout, purge, corruption)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCleared {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub reason: String,
}

impl SessionCleared {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            reason: reason.into(),
        }
    }
}

impl DomainEvent for SessionCleared {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "SessionCleared"
    }
}

// ============================================================================
// CATALOG EVENTS
// ============================================================================

/// Emitted once, when the catalog finishes its initial load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogLoaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub item_count: usize,
    pub from_fallback: bool,
}

impl CatalogLoaded {
    pub fn new(item_count: usize, from_fallback: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            item_count,
            from_fallback,
        }
    }
}

impl DomainEvent for CatalogLoaded {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "CatalogLoaded"
    }
}

// ============================================================================
// WISHLIST EVENTS
// ============================================================================

/// Emitted when an in-memory wishlist replacement completes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistSynced {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: UserId,
    pub entry_count: usize,
}

impl WishlistSynced {
    pub fn new(user_id: UserId, entry_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            entry_count,
        }
    }
}

impl DomainEvent for WishlistSynced {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "WishlistSynced"
    }
}

/// Emitted when the backend confirms a wishlist add
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistEntryAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: UserId,
    pub item_id: ItemId,
}

impl WishlistEntryAdded {
    pub fn new(user_id: UserId, item_id: ItemId) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            item_id,
        }
    }
}

impl DomainEvent for WishlistEntryAdded {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "WishlistEntryAdded"
    }
}

/// Emitted when the backend confirms a wishlist removal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistEntryRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: UserId,
    pub item_id: ItemId,
}

impl WishlistEntryRemoved {
    pub fn new(user_id: UserId, item_id: ItemId) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            item_id,
        }
    }
}

impl DomainEvent for WishlistEntryRemoved {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "WishlistEntryRemoved"
    }
}
