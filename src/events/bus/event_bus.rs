// src/events/bus/event_bus.rs
//
// Core event bus implementation.
//
// DESIGN PRINCIPLES:
// 1. Synchronous - handlers execute immediately in subscription order
// 2. Deterministic - same events -> same result
// 3. Observable - every emission is logged
// 4. Type-safe - events are strongly typed

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::events::types::DomainEvent;

/// Type-erased event handler function
/// Takes a reference to Any (downcasted to concrete event type inside)
type EventHandler = Box<dyn Fn(&dyn Any) + Send + Sync>;

/// Maximum number of log entries retained for diagnostics
const EVENT_LOG_CAPACITY: usize = 256;

/// Central coordination point for domain events.
///
/// Services emit events; UI surfaces and other services subscribe without
/// depending on each other directly. Execution is synchronous and in
/// subscription order.
pub struct EventBus {
    /// Map from event TypeId to list of handlers
    handlers: Arc<RwLock<HashMap<TypeId, Vec<EventHandler>>>>,

    /// Bounded emission log (for debugging)
    event_log: Arc<RwLock<Vec<EventLogEntry>>>,
}

/// A logged event for debugging and tracing
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: String,
    pub event_id: String,
    pub occurred_at: String,
    pub handler_count: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            event_log: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Subscribe to a specific event type.
    ///
    /// Handlers are executed in the order they are subscribed.
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<E>();

        // Wrap the typed handler in a type-erased closure
        let wrapped: EventHandler = Box::new(move |event_any: &dyn Any| {
            if let Some(event) = event_any.downcast_ref::<E>() {
                handler(event);
            } else {
                log::error!(
                    "Failed to downcast event in handler for {}",
                    std::any::type_name::<E>()
                );
            }
        });

        let mut handlers = self.handlers.write().unwrap();
        handlers.entry(type_id).or_insert_with(Vec::new).push(wrapped);
    }

    /// Emit an event to all subscribed handlers.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let type_id = TypeId::of::<E>();

        let handlers = self.handlers.read().unwrap();
        let handler_count = handlers.get(&type_id).map_or(0, Vec::len);

        log::debug!(
            "event {} ({}) -> {} handler(s)",
            event.event_type(),
            event.event_id(),
            handler_count
        );

        self.log_event(&event, handler_count);

        if let Some(subscribers) = handlers.get(&type_id) {
            for handler in subscribers {
                handler(&event);
            }
        }
    }

    /// Snapshot of recent emissions, oldest first.
    pub fn recent_events(&self) -> Vec<EventLogEntry> {
        self.event_log.read().unwrap().clone()
    }

    fn log_event<E: DomainEvent>(&self, event: &E, handler_count: usize) {
        let mut event_log = self.event_log.write().unwrap();
        if event_log.len() >= EVENT_LOG_CAPACITY {
            event_log.remove(0);
        }
        event_log.push(EventLogEntry {
            event_type: event.event_type().to_string(),
            event_id: event.event_id().to_string(),
            occurred_at: event.occurred_at().to_rfc3339(),
            handler_count,
        });
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
