//! Append-only activity log and the listeners notified on every event.

use std::rc::Rc;

use chirp_core::error::Result;
use chirp_core::models::Event;
use chirp_core::time_utils::now_timestamp;
use tracing::{debug, info};

use crate::store::{load_collection, update_collection, Storage, EVENTS};

// ── Listeners ─────────────────────────────────────────────────────────────────

/// Something that wants to hear about every recorded event.
pub trait EventListener {
    fn on_event(&self, event: &Event);
}

/// Forwards each event to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingListener;

impl EventListener for TracingListener {
    fn on_event(&self, event: &Event) {
        info!(kind = %event.kind, user = %event.user, at = %event.timestamp, "event recorded");
    }
}

/// Accepts events and does nothing with them.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl EventListener for NoopListener {
    fn on_event(&self, _event: &Event) {}
}

/// Ordered list of listeners.
///
/// Listeners are called synchronously in registration order. A panicking
/// listener unwinds through [`ListenerRegistry::notify`], so the ones after it
/// are skipped.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<Box<dyn EventListener>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener. The same listener may be registered twice.
    pub fn register(&mut self, listener: Box<dyn EventListener>) {
        self.listeners.push(listener);
        debug!(count = self.listeners.len(), "listener registered");
    }

    pub fn notify(&self, event: &Event) {
        for listener in &self.listeners {
            listener.on_event(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

// ── EventLog ──────────────────────────────────────────────────────────────────

/// Persisted activity log backed by the `events` collection.
pub struct EventLog {
    storage: Rc<dyn Storage>,
    listeners: ListenerRegistry,
}

impl EventLog {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Self {
            storage,
            listeners: ListenerRegistry::new(),
        }
    }

    pub fn register(&mut self, listener: Box<dyn EventListener>) {
        self.listeners.register(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Append a timestamped event, persist the log, then notify listeners.
    ///
    /// The load-append-save cycle is not atomic: with two writers the last
    /// save wins.
    pub fn record_event(&self, kind: &str, user: &str) -> Result<Event> {
        let event = Event {
            kind: kind.to_string(),
            user: user.to_string(),
            timestamp: now_timestamp(),
        };

        update_collection(&*self.storage, EVENTS, |events: &mut Vec<Event>| {
            events.push(event.clone());
            Ok(())
        })?;

        self.listeners.notify(&event);
        Ok(event)
    }

    /// All events in append order.
    pub fn events(&self) -> Result<Vec<Event>> {
        load_collection(&*self.storage, EVENTS)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
