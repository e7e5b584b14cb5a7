// src/lib.rs
// Matchday - owner-scoped schedule of sporting events and venues
//
// Architecture:
// - Domain-centric: entities and invariants live in `domain`
// - Tenant-scoped: every store query is filtered by the caller's owner id
// - Event-driven: services announce committed writes on the event bus
// - Application layer: async actions returning ActionResult

pub mod application;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod logging;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    validate_event, validate_event_update, validate_venue, validate_venue_update, Event,
    EventUpdate, EventWithVenues, OwnerId, SportFilter, SportType, Venue, VenueDraft, VenueUpdate,
};

// ============================================================================
// PUBLIC API - Errors & identity
// ============================================================================

pub use auth::Caller;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    DomainEvent, EventBus, EventCreated, EventDeleted, EventLogEntry, EventUpdated,
    VenueCreated, VenueDeleted, VenueUpdated, ViewsInvalidated,
};

// ============================================================================
// PUBLIC API - Store
// ============================================================================

pub use config::AppConfig;
pub use db::{create_connection_pool, initialize_database, ConnectionPool};
pub use repositories::{
    EventQuery, EventRepository, SqliteEventRepository, SqliteVenueRepository, VenueQuery,
    VenueRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{CreateEventRequest, EventService, UpdateEventRequest, VenueService, ViewPath};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{ActionResult, AppState};

pub use application::commands;
pub use application::dto;
