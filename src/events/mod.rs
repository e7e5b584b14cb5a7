// src/events/mod.rs
//
// Internal Event System - Public API
//
// CRITICAL: EventHandler is INTERNAL and must NOT be exported

pub mod bus;
pub mod types;

pub use types::DomainEvent;

pub use types::{
    // Schedule events
    EventCreated,
    EventDeleted,
    EventUpdated,
    // Venues
    VenueCreated,
    VenueDeleted,
    VenueUpdated,
    // Rendering layer
    ViewsInvalidated,
};

pub use bus::{EventBus, EventLogEntry};
