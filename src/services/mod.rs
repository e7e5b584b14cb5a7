// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Validate, persist through a repository, then notify. Nothing is emitted on failure.

pub mod event_service;
pub mod invalidation;
pub mod venue_service;


pub use event_service::{CreateEventRequest, EventService, UpdateEventRequest};
pub use invalidation::ViewPath;
pub use venue_service::VenueService;
