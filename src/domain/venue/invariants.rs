use super::entity::{Venue, VenueUpdate};
use crate::domain::{DomainError, DomainResult};

/// Validates all Venue invariants
pub fn validate_venue(venue: &Venue) -> DomainResult<()> {
    validate_name(&venue.name)?;
    validate_capacity(venue.capacity)?;

    if venue.updated_at < venue.created_at {
        return Err(DomainError::InvariantViolation(format!(
            "Venue updated_at {} precedes created_at {}",
            venue.updated_at, venue.created_at
        )));
    }

    Ok(())
}

/// Validates the supplied fields of a partial update
pub fn validate_venue_update(update: &VenueUpdate) -> DomainResult<()> {
    if let Some(name) = &update.name {
        validate_name(name)?;
    }
    if let Some(capacity) = update.capacity {
        validate_capacity(capacity)?;
    }
    Ok(())
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Venue name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_capacity(capacity: Option<u32>) -> DomainResult<()> {
    if capacity == Some(0) {
        return Err(DomainError::InvariantViolation(
            "Venue capacity must be a positive number".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OwnerId, VenueDraft};
    use uuid::Uuid;

    fn venue(name: &str, capacity: Option<u32>) -> Venue {
        Venue::new(
            OwnerId::new(Uuid::new_v4()),
            VenueDraft {
                name: name.to_string(),
                capacity,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_valid_venue() {
        assert!(validate_venue(&venue("Wembley", Some(90_000))).is_ok());
        assert!(validate_venue(&venue("Backyard", None)).is_ok());
    }

    #[test]
    fn test_empty_name_fails() {
        assert!(validate_venue(&venue("", None)).is_err());
    }

    #[test]
    fn test_zero_capacity_fails() {
        assert!(validate_venue(&venue("Wembley", Some(0))).is_err());
    }

    #[test]
    fn test_update_checks_only_supplied_fields() {
        assert!(validate_venue_update(&VenueUpdate::default()).is_ok());
        assert!(validate_venue_update(&VenueUpdate {
            capacity: Some(None),
            ..Default::default()
        })
        .is_ok());
        assert!(validate_venue_update(&VenueUpdate {
            capacity: Some(Some(0)),
            ..Default::default()
        })
        .is_err());
        assert!(validate_venue_update(&VenueUpdate {
            name: Some(String::new()),
            ..Default::default()
        })
        .is_err());
    }
}
