pub mod entity;
pub mod invariants;

pub use entity::{Event, EventUpdate, EventWithVenues};
pub use invariants::{validate_event, validate_event_update};
