pub mod entity;
pub mod invariants;

pub use entity::{Venue, VenueDraft, VenueUpdate};
pub use invariants::{validate_venue, validate_venue_update};
