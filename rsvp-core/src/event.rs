//! Conference event types.
//!
//! An `Event` is catalog metadata plus a cached RSVP count. The count is
//! advisory: the ledger is the source of truth and the catalog refreshes the
//! cached value after every ledger mutation.

use serde::{Deserialize, Serialize};

/// A conference event as listed in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Slug identifier, e.g. "art-show"
    pub id: String,
    pub name: String,
    /// Free-form schedule text, e.g. "Thursday 4:30-8:00 PM"
    pub date: String,
    pub description: String,
    /// External page for the event
    pub link: String,
    #[serde(default)]
    pub rsvp_count: usize,
}

/// Fields needed to create an event. The id is derived from the name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub date: String,
    pub description: String,
    pub link: String,
}

impl Event {
    pub fn new(id: impl Into<String>, new: NewEvent) -> Self {
        Event {
            id: id.into(),
            name: new.name,
            date: new.date,
            description: new.description,
            link: new.link,
            rsvp_count: 0,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
