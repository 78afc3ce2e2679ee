use std::sync::{Arc, Mutex};

use rsvp_core::{Catalog, Event, Rsvp, RsvpError, RsvpResult, RsvpStore};

/// Catalog and ledger, mutated together under one lock so that
/// check-then-insert and the cached count refresh happen atomically.
pub struct Registry {
    pub catalog: Catalog,
    pub ledger: Box<dyn RsvpStore>,
}

impl Registry {
    /// Record an RSVP and refresh the event's cached count.
    pub fn rsvp(&mut self, event_id: &str, user_address: &str) -> RsvpResult<(Rsvp, Event)> {
        let event = self
            .catalog
            .get(event_id)
            .cloned()
            .ok_or_else(|| RsvpError::EventNotFound(event_id.to_string()))?;

        let rsvp = self.ledger.add_unique(user_address, &event)?;
        let event = self.refresh_count(&event.id)?;
        Ok((rsvp, event))
    }

    /// Remove an RSVP and refresh the event's cached count.
    pub fn cancel(&mut self, user_address: &str, event_id: &str) -> RsvpResult<usize> {
        if !self.ledger.remove(user_address, event_id) {
            return Err(RsvpError::RsvpNotFound(event_id.to_string()));
        }
        let count = self.ledger.count_for_event(event_id);
        self.catalog.set_rsvp_count(event_id, count);
        Ok(count)
    }

    fn refresh_count(&mut self, event_id: &str) -> RsvpResult<Event> {
        let count = self.ledger.count_for_event(event_id);
        self.catalog.set_rsvp_count(event_id, count);
        self.catalog
            .get(event_id)
            .cloned()
            .ok_or_else(|| RsvpError::EventNotFound(event_id.to_string()))
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    registry: Arc<Mutex<Registry>>,
}

impl AppState {
    pub fn new(catalog: Catalog, ledger: impl RsvpStore + 'static) -> Self {
        AppState {
            registry: Arc::new(Mutex::new(Registry {
                catalog,
                ledger: Box::new(ledger),
            })),
        }
    }

    /// Run `f` with exclusive access to the catalog and ledger.
    /// Must not be called across an `.await`.
    pub fn with_registry<T>(&self, f: impl FnOnce(&mut Registry) -> RsvpResult<T>) -> RsvpResult<T> {
        let mut registry = self
            .registry
            .lock()
            .map_err(|_| RsvpError::Internal("registry lock poisoned".into()))?;
        f(&mut registry)
    }

    /// Recompute every cached count from the ledger.
    pub fn resync(&self) -> RsvpResult<usize> {
        self.with_registry(|r| Ok(r.catalog.resync(r.ledger.as_ref())))
    }
}
