// src/services/event_service.rs
use crate::domain::{
    now, validate_event, validate_event_update, Event, EventUpdate, EventWithVenues, OwnerId,
    SportType,
};
use crate::error::AppResult;
use crate::events::{EventBus, EventCreated, EventDeleted, EventUpdated};
use crate::repositories::{EventQuery, EventRepository};
use crate::services::invalidation::{
    event_created_views, event_deleted_views, event_updated_views, invalidate,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CreateEventRequest {
    pub name: String,
    pub sport_type: SportType,
    pub date_time: DateTime<Utc>,
    pub description: Option<String>,
    pub venue_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateEventRequest {
    pub changes: EventUpdate,
    /// `Some` (even empty) replaces every venue link; `None` leaves them alone
    pub venue_ids: Option<Vec<Uuid>>,
}

pub struct EventService {
    event_repo: Arc<dyn EventRepository>,
    event_bus: Arc<EventBus>,
}

impl EventService {
    pub fn new(event_repo: Arc<dyn EventRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            event_repo,
            event_bus,
        }
    }

    pub fn list_events(&self, owner: OwnerId, query: &EventQuery) -> AppResult<Vec<EventWithVenues>> {
        self.event_repo.list(owner, query)
    }

    pub fn get_event(&self, owner: OwnerId, event_id: Uuid) -> AppResult<Option<EventWithVenues>> {
        self.event_repo.get(owner, event_id)
    }

    pub fn count_events(&self, owner: OwnerId) -> AppResult<i64> {
        self.event_repo.count(owner)
    }

    pub fn create_event(&self, owner: OwnerId, request: CreateEventRequest) -> AppResult<Uuid> {
        let event = Event::new(
            owner,
            request.name,
            request.sport_type,
            request.date_time,
            request.description,
        );

        validate_event(&event)?;
        let venue_count = self.event_repo.insert(&event, &request.venue_ids)?;

        log::info!(
            "event=event_created module=event_service owner={} event_id={} venues={}",
            owner,
            event.id,
            venue_count
        );

        self.event_bus.emit(EventCreated::new(
            owner,
            event.id,
            event.name.clone(),
            event.sport_type.to_string(),
            venue_count,
        ));
        invalidate(&self.event_bus, owner, &event_created_views());

        Ok(event.id)
    }

    /// Write only the supplied fields. A missing or foreign event is
    /// `NotFoundOrForbidden` and nothing is emitted.
    pub fn update_event(
        &self,
        owner: OwnerId,
        event_id: Uuid,
        request: UpdateEventRequest,
    ) -> AppResult<Uuid> {
        let changes = request.changes.normalized();
        validate_event_update(&changes)?;

        let venues_replaced = request.venue_ids.is_some();
        self.event_repo
            .update(owner, event_id, &changes, now(), request.venue_ids)?;

        log::info!(
            "event=event_updated module=event_service owner={} event_id={} venues_replaced={}",
            owner,
            event_id,
            venues_replaced
        );

        self.event_bus
            .emit(EventUpdated::new(owner, event_id, venues_replaced));
        invalidate(&self.event_bus, owner, &event_updated_views(event_id));

        Ok(event_id)
    }

    pub fn delete_event(&self, owner: OwnerId, event_id: Uuid) -> AppResult<()> {
        self.event_repo.delete(owner, event_id)?;

        log::info!(
            "event=event_deleted module=event_service owner={} event_id={}",
            owner,
            event_id
        );

        self.event_bus.emit(EventDeleted::new(owner, event_id));
        invalidate(&self.event_bus, owner, &event_deleted_views());

        Ok(())
    }
}
