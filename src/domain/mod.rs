// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod event;
pub mod owner;
pub mod sport;
pub mod venue;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use event::{validate_event, validate_event_update, Event, EventUpdate, EventWithVenues};
pub use owner::OwnerId;
pub use sport::{SportFilter, SportType};
pub use venue::{validate_venue, validate_venue_update, Venue, VenueDraft, VenueUpdate};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Unknown sport type: {0}")]
    UnknownSport(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

// ============================================================================
// SHARED HELPERS
// ============================================================================

use chrono::{DateTime, SubsecRound, Utc};

/// Current time at the millisecond precision the store keeps.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Trim an optional free-text field, mapping blank input to `None`.
pub(crate) fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
