//! Error types for the rsvp ecosystem.

use thiserror::Error;

/// Errors that can occur in catalog and ledger operations.
#[derive(Error, Debug)]
pub enum RsvpError {
    #[error("{0}")]
    Validation(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("RSVP not found for event '{0}'")]
    RsvpNotFound(String),

    #[error("Address '{address}' has already RSVP'd to '{event_id}'")]
    DuplicateRsvp { address: String, event_id: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for rsvp operations.
pub type RsvpResult<T> = Result<T, RsvpError>;
