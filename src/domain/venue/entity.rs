use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{normalize_text, now, OwnerId, SportType};

/// A place where events are held
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: Uuid,
    pub owner_id: OwnerId,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,

    /// Seats; strictly positive when known
    pub capacity: Option<u32>,

    /// Sports this venue can host, deduplicated and in declaration order
    pub supported_sports: Vec<SportType>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a new venue
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueDraft {
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub capacity: Option<u32>,
    pub supported_sports: Vec<SportType>,
}

/// Partial update of a venue.
///
/// `None` leaves a field untouched; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueUpdate {
    pub name: Option<String>,
    pub address: Option<Option<String>>,
    pub city: Option<Option<String>>,
    pub state: Option<Option<String>>,
    pub postal_code: Option<Option<String>>,
    pub capacity: Option<Option<u32>>,
    pub supported_sports: Option<Vec<SportType>>,
}

impl VenueUpdate {
    /// Normalise the supplied fields the way `Venue::new` does
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.map(|name| name.trim().to_string()),
            address: self.address.map(normalize_text),
            city: self.city.map(normalize_text),
            state: self.state.map(normalize_text),
            postal_code: self.postal_code.map(normalize_text),
            capacity: self.capacity,
            supported_sports: self.supported_sports.map(normalize_sports),
        }
    }
}

/// Sort and deduplicate a sport set
pub(crate) fn normalize_sports(mut sports: Vec<SportType>) -> Vec<SportType> {
    sports.sort();
    sports.dedup();
    sports
}

impl Venue {
    pub fn new(owner_id: OwnerId, draft: VenueDraft) -> Self {
        let now = now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: draft.name.trim().to_string(),
            address: normalize_text(draft.address),
            city: normalize_text(draft.city),
            state: normalize_text(draft.state),
            postal_code: normalize_text(draft.postal_code),
            capacity: draft.capacity,
            supported_sports: normalize_sports(draft.supported_sports),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn supports(&self, sport: SportType) -> bool {
        self.supported_sports.contains(&sport)
    }
}
