//! Core types for the rsvp service.
//!
//! - `catalog`: the known events and their cached RSVP counts
//! - `ledger`: the RSVP records and the `RsvpStore` seam
//! - `config`: server configuration shared with the CLI defaults

pub mod catalog;
pub mod config;
pub mod error;
pub mod event;
pub mod ledger;

pub use catalog::{Catalog, CatalogStats, Popularity};
pub use error::{RsvpError, RsvpResult};
pub use event::{Event, NewEvent};
pub use ledger::{InMemoryLedger, Rsvp, RsvpStore};
