// src/repositories/mod.rs
//
// Repository layer
//
// RULES:
// - Repositories are DUMB data mappers
// - NO invariant enforcement, NO event emission
// - Every statement carries `owner_id = ?`; methods take a resolved OwnerId
// - Explicit SQL only

pub mod event_repository;
pub mod event_venue_links;
mod rows;
pub mod venue_repository;

pub use event_repository::{EventQuery, EventRepository, SqliteEventRepository};
pub use venue_repository::{SqliteVenueRepository, VenueQuery, VenueRepository};

#[cfg(test)]
pub use event_repository::MockEventRepository;
#[cfg(test)]
pub use venue_repository::MockVenueRepository;
