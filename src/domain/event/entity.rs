use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{normalize_text, now, OwnerId, SportType, Venue};

/// A scheduled sporting event owned by exactly one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Owner; set once on creation and never rewritten
    pub owner_id: OwnerId,

    /// Display name
    pub name: String,

    pub sport_type: SportType,

    /// When the event starts
    pub date_time: DateTime<Utc>,

    pub description: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// An event together with the venues it is linked to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventWithVenues {
    #[serde(flatten)]
    pub event: Event,
    pub venues: Vec<Venue>,
}

impl EventWithVenues {
    pub fn venue_ids(&self) -> Vec<Uuid> {
        self.venues.iter().map(|v| v.id).collect()
    }
}

/// Partial update of an event.
///
/// `None` leaves a field untouched. `description: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventUpdate {
    pub name: Option<String>,
    pub sport_type: Option<SportType>,
    pub date_time: Option<DateTime<Utc>>,
    pub description: Option<Option<String>>,
}

impl EventUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sport_type.is_none()
            && self.date_time.is_none()
            && self.description.is_none()
    }

    /// Apply the same trimming and precision rules as `Event::new` to the
    /// supplied fields. Absent fields stay absent.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.map(|name| name.trim().to_string()),
            sport_type: self.sport_type,
            date_time: self.date_time.map(|dt| dt.trunc_subsecs(3)),
            description: self.description.map(normalize_text),
        }
    }
}

impl Event {
    /// Create a new Event owned by `owner_id`
    pub fn new(
        owner_id: OwnerId,
        name: String,
        sport_type: SportType,
        date_time: DateTime<Utc>,
        description: Option<String>,
    ) -> Self {
        let now = now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.trim().to_string(),
            sport_type,
            date_time: date_time.trunc_subsecs(3),
            description: normalize_text(description),
            created_at: now,
            updated_at: now,
        }
    }
}
