//! RSVP ledger: the mutable list of RSVP records.
//!
//! Records are kept in insertion order and every query is a linear scan.
//! The ledger is small (one conference, a few hundred RSVPs at most), so
//! there is no index over (address, event id).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RsvpError, RsvpResult};
use crate::event::Event;

/// A user's confirmed intent to attend an event.
///
/// The event fields are a snapshot taken when the RSVP was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    pub id: String,
    /// Wallet address, always lowercase
    pub user_address: String,
    pub event_id: String,
    pub rsvp_date: DateTime<Utc>,
    pub event_name: String,
    pub event_date: String,
    pub event_description: String,
    pub event_link: String,
}

impl Rsvp {
    fn new(user_address: &str, event: &Event) -> Self {
        Rsvp {
            id: format!("rsvp_{}", Uuid::new_v4().simple()),
            user_address: normalize_address(user_address),
            event_id: event.id.clone(),
            rsvp_date: Utc::now(),
            event_name: event.name.clone(),
            event_date: event.date.clone(),
            event_description: event.description.clone(),
            event_link: event.link.clone(),
        }
    }

    fn matches(&self, user_address: &str, event_id: &str) -> bool {
        self.user_address == user_address && self.event_id == event_id
    }
}

/// Wallet addresses compare case-insensitively.
pub fn normalize_address(address: &str) -> String {
    address.to_lowercase()
}

/// Storage for RSVP records.
///
/// Implementations are not internally synchronized. Callers that share a
/// store between tasks must hold a lock across check-then-insert sequences.
pub trait RsvpStore: Send {
    /// Append a new RSVP. Does not check for an existing RSVP for the same
    /// (address, event) pair; see [`RsvpStore::add_unique`].
    fn add(&mut self, user_address: &str, event: &Event) -> Rsvp;

    fn exists(&self, user_address: &str, event_id: &str) -> bool;

    fn list_for_user(&self, user_address: &str) -> Vec<Rsvp>;

    /// Remove every RSVP for the pair. Returns whether anything was removed.
    fn remove(&mut self, user_address: &str, event_id: &str) -> bool;

    fn count_for_event(&self, event_id: &str) -> usize;

    fn list_all(&self) -> Vec<Rsvp>;

    /// Insert only if the pair has no RSVP yet.
    fn add_unique(&mut self, user_address: &str, event: &Event) -> RsvpResult<Rsvp> {
        if self.exists(user_address, &event.id) {
            return Err(RsvpError::DuplicateRsvp {
                address: normalize_address(user_address),
                event_id: event.id.clone(),
            });
        }
        Ok(self.add(user_address, event))
    }
}

/// Process-lifetime ledger backed by a `Vec`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLedger {
    rsvps: Vec<Rsvp>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rsvps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rsvps.is_empty()
    }
}

impl RsvpStore for InMemoryLedger {
    fn add(&mut self, user_address: &str, event: &Event) -> Rsvp {
        let rsvp = Rsvp::new(user_address, event);
        self.rsvps.push(rsvp.clone());
        rsvp
    }

    fn exists(&self, user_address: &str, event_id: &str) -> bool {
        let address = normalize_address(user_address);
        self.rsvps.iter().any(|r| r.matches(&address, event_id))
    }

    fn list_for_user(&self, user_address: &str) -> Vec<Rsvp> {
        let address = normalize_address(user_address);
        self.rsvps
            .iter()
            .filter(|r| r.user_address == address)
            .cloned()
            .collect()
    }

    fn remove(&mut self, user_address: &str, event_id: &str) -> bool {
        let address = normalize_address(user_address);
        let before = self.rsvps.len();
        self.rsvps.retain(|r| !r.matches(&address, event_id));
        self.rsvps.len() < before
    }

    fn count_for_event(&self, event_id: &str) -> usize {
        self.rsvps.iter().filter(|r| r.event_id == event_id).count()
    }

    fn list_all(&self) -> Vec<Rsvp> {
        self.rsvps.clone()
    }
}
