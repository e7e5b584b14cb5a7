// src/events/types.rs
//
// Notifications emitted after a successful write.
// Each one is an immutable fact that has already been committed.
//
// RULES:
// - Facts, not commands
// - Carry only the data needed to react
// - Never emitted for a failed write

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::OwnerId;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this notification
    fn id(&self) -> Uuid;

    /// When this notification was raised
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// SCHEDULE EVENT NOTIFICATIONS
// ============================================================================

/// Emitted when an event is created together with its venue links
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCreated {
    pub id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub owner_id: OwnerId,
    pub event_id: Uuid,
    pub name: String,
    pub sport_type: String,
    pub venue_count: usize,
}

impl EventCreated {
    pub fn new(
        owner_id: OwnerId,
        event_id: Uuid,
        name: String,
        sport_type: String,
        venue_count: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            owner_id,
            event_id,
            name,
            sport_type,
            venue_count,
        }
    }
}

impl DomainEvent for EventCreated {
    fn id(&self) -> Uuid { self.id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "EventCreated" }
}

/// Emitted when an event is updated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventUpdated {
    pub id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub owner_id: OwnerId,
    pub event_id: Uuid,
    /// True when the venue links were replaced as part of the update
    pub venues_replaced: bool,
}

impl EventUpdated {
    pub fn new(owner_id: OwnerId, event_id: Uuid, venues_replaced: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            owner_id,
            event_id,
            venues_replaced,
        }
    }
}

impl DomainEvent for EventUpdated {
    fn id(&self) -> Uuid { self.id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "EventUpdated" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDeleted {
    pub id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub owner_id: OwnerId,
    pub event_id: Uuid,
}

impl EventDeleted {
    pub fn new(owner_id: OwnerId, event_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            owner_id,
            event_id,
        }
    }
}

impl DomainEvent for EventDeleted {
    fn id(&self) -> Uuid { self.id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "EventDeleted" }
}

// ============================================================================
// VENUE NOTIFICATIONS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueCreated {
    pub id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub owner_id: OwnerId,
    pub venue_id: Uuid,
    pub name: String,
}

impl VenueCreated {
    pub fn new(owner_id: OwnerId, venue_id: Uuid, name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            owner_id,
            venue_id,
            name,
        }
    }
}

impl DomainEvent for VenueCreated {
    fn id(&self) -> Uuid { self.id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "VenueCreated" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueUpdated {
    pub id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub owner_id: OwnerId,
    pub venue_id: Uuid,
}

impl VenueUpdated {
    pub fn new(owner_id: OwnerId, venue_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            owner_id,
            venue_id,
        }
    }
}

impl DomainEvent for VenueUpdated {
    fn id(&self) -> Uuid { self.id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "VenueUpdated" }
}

/// Emitted when a venue is deleted. Its event links went with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueDeleted {
    pub id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub owner_id: OwnerId,
    pub venue_id: Uuid,
}

impl VenueDeleted {
    pub fn new(owner_id: OwnerId, venue_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            owner_id,
            venue_id,
        }
    }
}

impl DomainEvent for VenueDeleted {
    fn id(&self) -> Uuid { self.id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "VenueDeleted" }
}

// ============================================================================
// VIEW INVALIDATION
// ============================================================================

/// Tells the rendering layer which views now show stale data.
///
/// One-way: nothing in this crate waits for a reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewsInvalidated {
    pub id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub owner_id: OwnerId,
    pub paths: Vec<String>,
}

impl ViewsInvalidated {
    pub fn new(owner_id: OwnerId, paths: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            owner_id,
            paths,
        }
    }
}

impl DomainEvent for ViewsInvalidated {
    fn id(&self) -> Uuid { self.id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ViewsInvalidated" }
}
