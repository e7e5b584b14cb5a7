// src/application/commands/mod.rs
//
// Action handlers
//
// ARCHITECTURE:
// - Actions are thin adapters between the rendering layer and services
// - Each one resolves the caller's owner before anything else
// - Ids, timestamps and sport names are parsed here, never deeper
// - Store work runs on the blocking pool
// - Actions NEVER contain business logic

pub mod event_commands;
pub mod venue_commands;

#[cfg(test)]
mod event_commands_tests;

pub use event_commands::*;
pub use venue_commands::*;

use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

use crate::domain::{SportFilter, SportType};
use crate::error::{AppError, AppResult};

pub(crate) fn parse_id(value: &str) -> AppResult<Uuid> {
    Ok(Uuid::parse_str(value.trim())?)
}

pub(crate) fn parse_ids(values: &[String]) -> AppResult<Vec<Uuid>> {
    values.iter().map(|value| parse_id(value)).collect()
}

/// RFC 3339 with any offset, normalised to UTC.
///
/// The UTC year must stay within 0000-9999 so the stored text keeps its
/// fixed width and parses back.
pub(crate) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(value.trim())?.with_timezone(&Utc);
    if !(0..=9999).contains(&parsed.year()) {
        return Err(AppError::Validation(format!(
            "timestamp out of range: {}",
            value.trim()
        )));
    }
    Ok(parsed)
}

pub(crate) fn parse_sport(value: &str) -> AppResult<SportType> {
    value
        .trim()
        .parse()
        .map_err(|e: crate::domain::DomainError| AppError::Validation(e.to_string()))
}

pub(crate) fn parse_sports(values: &[String]) -> AppResult<Vec<SportType>> {
    values.iter().map(|value| parse_sport(value)).collect()
}

pub(crate) fn parse_filter(value: Option<&str>) -> AppResult<SportFilter> {
    SportFilter::parse(value).map_err(|e| AppError::Validation(e.to_string()))
}
