// src/application/state.rs

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::{create_connection_pool, create_test_pool, get_connection, initialize_database, ConnectionPool};
use crate::error::AppResult;
use crate::events::EventBus;
use crate::repositories::{EventRepository, SqliteEventRepository, SqliteVenueRepository, VenueRepository};
use crate::services::{EventService, VenueService};

/// Shared state handed to every action.
/// All fields are Arc-wrapped so actions can move clones onto the blocking pool.
#[derive(Clone)]
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub event_service: Arc<EventService>,
    pub venue_service: Arc<VenueService>,
}

impl AppState {
    /// Open the configured database, bring its schema up to date and wire services
    pub fn bootstrap(config: &AppConfig) -> AppResult<Self> {
        let pool = Arc::new(create_connection_pool(config)?);
        Self::from_pool(pool)
    }

    /// Private in-memory database with the current schema
    pub fn in_memory() -> AppResult<Self> {
        let pool = Arc::new(create_test_pool()?);
        Self::from_pool(pool)
    }

    pub fn from_pool(pool: Arc<ConnectionPool>) -> AppResult<Self> {
        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
        }

        let event_bus = Arc::new(EventBus::new());

        let event_repo: Arc<dyn EventRepository> = Arc::new(SqliteEventRepository::new(pool.clone()));
        let venue_repo: Arc<dyn VenueRepository> = Arc::new(SqliteVenueRepository::new(pool));

        Ok(Self {
            event_service: Arc::new(EventService::new(event_repo, event_bus.clone())),
            venue_service: Arc::new(VenueService::new(venue_repo, event_bus.clone())),
            event_bus,
        })
    }
}
