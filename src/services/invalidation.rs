// src/services/invalidation.rs
//
// Which rendered views depend on which writes.

use uuid::Uuid;

use crate::domain::OwnerId;
use crate::events::{EventBus, ViewsInvalidated};

/// A view of the rendering layer that shows owner data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPath {
    /// Event list
    Dashboard,
    /// Single event edit form
    EventEdit(Uuid),
    /// Venue list
    Venues,
    /// New event form, which offers the owner's venues
    NewEvent,
}

impl ViewPath {
    pub fn as_path(&self) -> String {
        match self {
            ViewPath::Dashboard => "/dashboard".to_string(),
            ViewPath::EventEdit(id) => format!("/events/{}/edit", id),
            ViewPath::Venues => "/venues".to_string(),
            ViewPath::NewEvent => "/events/new".to_string(),
        }
    }
}

pub fn event_created_views() -> Vec<ViewPath> {
    vec![ViewPath::Dashboard]
}

pub fn event_updated_views(event_id: Uuid) -> Vec<ViewPath> {
    vec![ViewPath::Dashboard, ViewPath::EventEdit(event_id)]
}

pub fn event_deleted_views() -> Vec<ViewPath> {
    vec![ViewPath::Dashboard]
}

/// Venue writes change both the venue list and the venue picker on the new event form
pub fn venue_changed_views() -> Vec<ViewPath> {
    vec![ViewPath::Venues, ViewPath::NewEvent]
}

/// Signal the rendering layer that `views` are stale for `owner`
pub fn invalidate(bus: &EventBus, owner: OwnerId, views: &[ViewPath]) {
    let paths: Vec<String> = views.iter().map(ViewPath::as_path).collect();
    log::debug!(
        "event=views_invalidated module=invalidation owner={} paths={:?}",
        owner,
        paths
    );
    bus.emit(ViewsInvalidated::new(owner, paths));
}
