//! Event catalog: the known events and their display metadata.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RsvpError, RsvpResult};
use crate::event::{Event, NewEvent};
use crate::ledger::RsvpStore;

/// Number of events reported as the top of the popularity ranking
const TOP_EVENTS: usize = 3;

/// Insertion-ordered collection of events, keyed by slug id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    events: Vec<Event>,
}

/// Aggregate counts over the whole catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_events: usize,
    #[serde(rename = "totalRSVPs")]
    pub total_rsvps: usize,
}

/// Events ranked by cached RSVP count
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Popularity {
    pub popular_events: Vec<Event>,
    pub top3_events: Vec<Event>,
    pub most_popular: Option<Event>,
}

/// On-disk catalog format (TOML)
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    events: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: Option<String>,
    #[serde(flatten)]
    event: NewEvent,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The Onchain Summit lineup the service ships with.
    pub fn builtin() -> Self {
        let mut catalog = Catalog::new();
        for (id, name, date, description, link) in BUILTIN_EVENTS {
            catalog.insert(Event::new(
                *id,
                NewEvent {
                    name: name.to_string(),
                    date: date.to_string(),
                    description: description.to_string(),
                    link: link.to_string(),
                },
            ));
        }
        catalog
    }

    /// Load a catalog from a TOML file of `[[events]]` tables.
    /// Entries without an `id` get one derived from their name.
    pub fn load(path: &Path) -> RsvpResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: CatalogFile = toml::from_str(&content).map_err(|e| {
            RsvpError::Config(format!("Invalid catalog file {}: {e}", path.display()))
        })?;

        let mut catalog = Catalog::new();
        for entry in file.events {
            let id = entry.id.unwrap_or_else(|| event_id_for(&entry.event.name));
            catalog.insert(Event::new(id, entry.event));
        }
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn list(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Create an event from its name and metadata.
    ///
    /// An existing event with the same derived id is overwritten in place.
    pub fn put(&mut self, new: NewEvent) -> Event {
        let event = Event::new(event_id_for(&new.name), new);
        self.insert(event.clone());
        event
    }

    fn insert(&mut self, event: Event) {
        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event,
            None => self.events.push(event),
        }
    }

    /// Update the cached count for one event. Returns false if the id is unknown.
    pub fn set_rsvp_count(&mut self, id: &str, count: usize) -> bool {
        match self.events.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                event.rsvp_count = count;
                true
            }
            None => false,
        }
    }

    /// Recompute every cached count from the ledger.
    /// Returns the number of events whose count changed.
    pub fn resync(&mut self, ledger: &dyn RsvpStore) -> usize {
        let mut changed = 0;
        for event in &mut self.events {
            let count = ledger.count_for_event(&event.id);
            if event.rsvp_count != count {
                event.rsvp_count = count;
                changed += 1;
            }
        }
        changed
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total_events: self.events.len(),
            total_rsvps: self.events.iter().map(|e| e.rsvp_count).sum(),
        }
    }

    /// Rank events by cached RSVP count, highest first.
    /// Ties keep catalog order.
    pub fn popularity(&self) -> Popularity {
        let mut popular_events = self.events.clone();
        popular_events.sort_by(|a, b| b.rsvp_count.cmp(&a.rsvp_count));

        let top3_events = popular_events.iter().take(TOP_EVENTS).cloned().collect();
        let most_popular = popular_events.first().cloned();

        Popularity {
            popular_events,
            top3_events,
            most_popular,
        }
    }
}

/// Derive an event id from its name: lowercase, then every character
/// outside `[a-z0-9]` becomes `-`.
pub fn event_id_for(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '-' })
        .collect()
}

static BUILTIN_EVENTS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "art-show",
        "Onchain Summit Art Show",
        "Thursday 4:30-8:00 PM",
        "Digital art showcase featuring amazing artists",
        "https://lu.ma/gibwsgx3",
    ),
    (
        "roor-osc-party",
        "ROOR OSC Party",
        "Friday 8:00-11:00 PM",
        "Exclusive party for Onchain Summit attendees",
        "https://lu.ma/roor-osc-party",
    ),
    (
        "dev-workshop",
        "Developer Workshop",
        "Saturday 2:00-5:00 PM",
        "Hands-on blockchain development workshop",
        "https://lu.ma/dev-workshop",
    ),
    (
        "networking",
        "Networking Mixer",
        "Sunday 6:00-9:00 PM",
        "Connect with fellow blockchain enthusiasts",
        "https://lu.ma/networking",
    ),
    (
        "panel-discussion",
        "Panel Discussion",
        "Monday 3:00-4:30 PM",
        "Industry leaders discuss the future of Web3",
        "https://lu.ma/panel-discussion",
    ),
];
