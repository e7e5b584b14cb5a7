use chrono::{DateTime, Datelike, Utc};

use super::entity::{Event, EventUpdate};
use crate::domain::{DomainError, DomainResult};

/// Validates all Event invariants
pub fn validate_event(event: &Event) -> DomainResult<()> {
    validate_name(&event.name)?;
    validate_date_time(&event.date_time)?;
    validate_timestamps(event)?;
    Ok(())
}

/// Validates the supplied fields of a partial update
pub fn validate_event_update(update: &EventUpdate) -> DomainResult<()> {
    if let Some(name) = &update.name {
        validate_name(name)?;
    }
    if let Some(date_time) = &update.date_time {
        validate_date_time(date_time)?;
    }
    Ok(())
}

/// Name cannot be empty
fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Event name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Start time must have a four-digit UTC year
fn validate_date_time(date_time: &DateTime<Utc>) -> DomainResult<()> {
    if !(0..=9999).contains(&date_time.year()) {
        return Err(DomainError::InvariantViolation(format!(
            "Event date_time {} is outside years 0000-9999",
            date_time
        )));
    }
    Ok(())
}

fn validate_timestamps(event: &Event) -> DomainResult<()> {
    if event.updated_at < event.created_at {
        return Err(DomainError::InvariantViolation(format!(
            "Event updated_at {} precedes created_at {}",
            event.updated_at, event.created_at
        )));
    }
    Ok(())
}

/// Invariants that must hold true for Event domain:
///
/// 1. Identity (UUID) is immutable
/// 2. Owner is immutable and always the acting caller
/// 3. Name cannot be empty
/// 4. Start time falls within years 0000-9999 (UTC)
/// 5. Created timestamp never changes
/// 6. Updated timestamp reflects last modification
