// src/services/venue_service.rs
use crate::domain::{
    now, validate_venue, validate_venue_update, OwnerId, Venue, VenueDraft, VenueUpdate,
};
use crate::error::AppResult;
use crate::events::{EventBus, VenueCreated, VenueDeleted, VenueUpdated};
use crate::repositories::{VenueQuery, VenueRepository};
use crate::services::invalidation::{invalidate, venue_changed_views};
use std::sync::Arc;
use uuid::Uuid;

pub struct VenueService {
    venue_repo: Arc<dyn VenueRepository>,
    event_bus: Arc<EventBus>,
}

impl VenueService {
    pub fn new(venue_repo: Arc<dyn VenueRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            venue_repo,
            event_bus,
        }
    }

    pub fn list_venues(&self, owner: OwnerId, query: &VenueQuery) -> AppResult<Vec<Venue>> {
        self.venue_repo.list(owner, query)
    }

    pub fn get_venue(&self, owner: OwnerId, venue_id: Uuid) -> AppResult<Option<Venue>> {
        self.venue_repo.get(owner, venue_id)
    }

    pub fn venues_for_event(&self, owner: OwnerId, event_id: Uuid) -> AppResult<Vec<Venue>> {
        self.venue_repo.list_for_event(owner, event_id)
    }

    pub fn create_venue(&self, owner: OwnerId, draft: VenueDraft) -> AppResult<Uuid> {
        let venue = Venue::new(owner, draft);

        validate_venue(&venue)?;
        self.venue_repo.insert(&venue)?;

        log::info!(
            "event=venue_created module=venue_service owner={} venue_id={}",
            owner,
            venue.id
        );

        self.event_bus
            .emit(VenueCreated::new(owner, venue.id, venue.name.clone()));
        invalidate(&self.event_bus, owner, &venue_changed_views());

        Ok(venue.id)
    }

    pub fn update_venue(&self, owner: OwnerId, venue_id: Uuid, changes: VenueUpdate) -> AppResult<Uuid> {
        let changes = changes.normalized();
        validate_venue_update(&changes)?;
        self.venue_repo.update(owner, venue_id, &changes, now())?;

        log::info!(
            "event=venue_updated module=venue_service owner={} venue_id={}",
            owner,
            venue_id
        );

        self.event_bus.emit(VenueUpdated::new(owner, venue_id));
        invalidate(&self.event_bus, owner, &venue_changed_views());

        Ok(venue_id)
    }

    pub fn delete_venue(&self, owner: OwnerId, venue_id: Uuid) -> AppResult<()> {
        self.venue_repo.delete(owner, venue_id)?;

        log::info!(
            "event=venue_deleted module=venue_service owner={} venue_id={}",
            owner,
            venue_id
        );

        self.event_bus.emit(VenueDeleted::new(owner, venue_id));
        invalidate(&self.event_bus, owner, &venue_changed_views());

        Ok(())
    }
}
