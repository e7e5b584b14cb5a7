// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// PRINCIPLES:
// - DTOs are the wire shapes the rendering layer sends and receives
// - Ids and timestamps travel as strings; parsing happens in the commands
// - Conversion FROM domain entities only

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{Event, EventWithVenues, Venue};

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Keeps an explicit `null` apart from an absent field: absent stays `None`
/// through `#[serde(default)]`, `null` becomes `Some(None)`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// ============================================================================
// EVENT DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDto {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub sport_type: String,
    pub sport_label: String,
    pub date_time: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventWithVenuesDto {
    #[serde(flatten)]
    pub event: EventDto,
    pub venues: Vec<VenueDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventDto {
    pub name: String,
    pub sport_type: String,
    /// RFC 3339
    pub date_time: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub venue_ids: Vec<String>,
}

/// Partial event update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    /// Present (even empty) replaces every venue link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_ids: Option<Vec<String>>,
}

// ============================================================================
// VENUE DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueDto {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub capacity: Option<u32>,
    pub supported_sports: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateVenueDto {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub supported_sports: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateVenueDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub state: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Option<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_sports: Option<Vec<String>>,
}

// ============================================================================
// SMALL RESPONSES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdDto {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedDto {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountDto {
    pub count: i64,
}

// ============================================================================
// CONVERSIONS (Domain → DTO)
// ============================================================================

impl From<Event> for EventDto {
    fn from(event: Event) -> Self {
        Self {
            id: event.id.to_string(),
            owner_id: event.owner_id.to_string(),
            name: event.name,
            sport_type: event.sport_type.as_str().to_string(),
            sport_label: event.sport_type.label().to_string(),
            date_time: timestamp(event.date_time),
            description: event.description,
            created_at: timestamp(event.created_at),
            updated_at: timestamp(event.updated_at),
        }
    }
}

impl From<Venue> for VenueDto {
    fn from(venue: Venue) -> Self {
        Self {
            id: venue.id.to_string(),
            owner_id: venue.owner_id.to_string(),
            name: venue.name,
            address: venue.address,
            city: venue.city,
            state: venue.state,
            postal_code: venue.postal_code,
            capacity: venue.capacity,
            supported_sports: venue
                .supported_sports
                .iter()
                .map(|sport| sport.as_str().to_string())
                .collect(),
            created_at: timestamp(venue.created_at),
            updated_at: timestamp(venue.updated_at),
        }
    }
}

impl From<EventWithVenues> for EventWithVenuesDto {
    fn from(value: EventWithVenues) -> Self {
        Self {
            event: EventDto::from(value.event),
            venues: value.venues.into_iter().map(VenueDto::from).collect(),
        }
    }
}

impl From<uuid::Uuid> for IdDto {
    fn from(id: uuid::Uuid) -> Self {
        Self { id: id.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OwnerId, SportType, VenueDraft};
    use chrono::TimeZone;
    use uuid::Uuid;

    #[test]
    fn test_update_event_dto_distinguishes_absent_and_empty_venues() {
        let absent: UpdateEventDto = serde_json::from_str(r#"{"name":"Derby"}"#).unwrap();
        assert_eq!(absent.venue_ids, None);
        assert_eq!(absent.description, None);

        let empty: UpdateEventDto =
            serde_json::from_str(r#"{"venue_ids":[],"description":null}"#).unwrap();
        assert_eq!(empty.venue_ids, Some(vec![]));
        assert_eq!(empty.description, Some(None));
    }

    #[test]
    fn test_update_venue_dto_clear_vs_leave() {
        let dto: UpdateVenueDto =
            serde_json::from_str(r#"{"capacity":null,"city":"Porto"}"#).unwrap();
        assert_eq!(dto.capacity, Some(None));
        assert_eq!(dto.city, Some(Some("Porto".to_string())));
        assert_eq!(dto.address, None);
    }

    #[test]
    fn test_event_with_venues_dto_is_flat() {
        let owner = OwnerId::new(Uuid::new_v4());
        let event = Event::new(
            owner,
            "Final".to_string(),
            SportType::Basketball,
            Utc.with_ymd_and_hms(2026, 6, 1, 20, 30, 0).unwrap(),
            None,
        );
        let venue = Venue::new(
            owner,
            VenueDraft {
                name: "Garden".to_string(),
                supported_sports: vec![SportType::Basketball],
                ..Default::default()
            },
        );

        let dto = EventWithVenuesDto::from(EventWithVenues {
            event,
            venues: vec![venue],
        });
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["sport_type"], "basketball");
        assert_eq!(json["sport_label"], "Basketball");
        assert_eq!(json["date_time"], "2026-06-01T20:30:00.000Z");
        assert_eq!(json["venues"][0]["supported_sports"][0], "basketball");
    }
}
