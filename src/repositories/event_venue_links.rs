// src/repositories/event_venue_links.rs
//
// Event <-> Venue association rows.
//
// RULES:
// - Only called from event writes, inside their transaction
// - Replace-all on update: delete every link for the event, insert the new set
// - A venue is linked only if the same owner holds it; anything else aborts the write

use std::collections::{HashMap, HashSet};

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Transaction};
use uuid::Uuid;

use crate::domain::{OwnerId, Venue};
use crate::error::{AppError, AppResult};
use crate::repositories::rows::{row_to_venue, uuid_column, VENUE_COLUMNS};

/// Distinct ids in first-seen order
fn distinct(venue_ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::with_capacity(venue_ids.len());
    venue_ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Insert one link per distinct venue id.
///
/// Fails with `NotFoundOrForbidden` when a venue is missing or belongs to another owner.
pub fn link_venues(
    tx: &Transaction<'_>,
    owner: OwnerId,
    event_id: Uuid,
    venue_ids: &[Uuid],
) -> AppResult<usize> {
    let mut stmt = tx.prepare(
        "INSERT INTO event_venues (event_id, venue_id)
         SELECT ?1, v.id FROM venues v WHERE v.id = ?2 AND v.owner_id = ?3",
    )?;

    let mut linked = 0;
    for venue_id in distinct(venue_ids) {
        let inserted = stmt.execute(params![
            event_id.to_string(),
            venue_id.to_string(),
            owner.to_string()
        ])?;

        if inserted == 0 {
            log::warn!(
                "event=link_rejected module=event_venue_links event_id={} venue_id={}",
                event_id,
                venue_id
            );
            return Err(AppError::NotFoundOrForbidden);
        }
        linked += inserted;
    }

    Ok(linked)
}

/// Discard every link of `event_id` and write `venue_ids` as the new set
pub fn replace_venues(
    tx: &Transaction<'_>,
    owner: OwnerId,
    event_id: Uuid,
    venue_ids: &[Uuid],
) -> AppResult<usize> {
    let removed = tx.execute(
        "DELETE FROM event_venues WHERE event_id = ?1",
        params![event_id.to_string()],
    )?;

    let linked = link_venues(tx, owner, event_id, venue_ids)?;

    log::debug!(
        "event=links_replaced module=event_venue_links event_id={} removed={} linked={}",
        event_id,
        removed,
        linked
    );

    Ok(linked)
}

/// Load the venues linked to each of `event_ids`, ordered by venue name.
///
/// Events without links are absent from the map.
pub fn venues_by_event(
    conn: &Connection,
    owner: OwnerId,
    event_ids: &[Uuid],
) -> AppResult<HashMap<Uuid, Vec<Venue>>> {
    let mut grouped: HashMap<Uuid, Vec<Venue>> = HashMap::new();
    if event_ids.is_empty() {
        return Ok(grouped);
    }

    let placeholders = (0..event_ids.len())
        .map(|i| format!("?{}", i + 2))
        .collect::<Vec<_>>()
        .join(", ");

    let sql = format!(
        "SELECT ev.event_id AS link_event_id, {columns}
         FROM event_venues ev
         JOIN events e ON e.id = ev.event_id
         JOIN venues v ON v.id = ev.venue_id
         WHERE e.owner_id = ?1 AND v.owner_id = ?1
           AND ev.event_id IN ({placeholders})
         ORDER BY v.name, v.created_at",
        columns = VENUE_COLUMNS,
        placeholders = placeholders,
    );

    let mut values = Vec::with_capacity(event_ids.len() + 1);
    values.push(Value::Text(owner.to_string()));
    values.extend(event_ids.iter().map(|id| Value::Text(id.to_string())));

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values), |row| {
        Ok((uuid_column(row, "link_event_id")?, row_to_venue(row)?))
    })?;

    for row in rows {
        let (event_id, venue) = row?;
        grouped.entry(event_id).or_default().push(venue);
    }

    Ok(grouped)
}
