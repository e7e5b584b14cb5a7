// src/repositories/event_repository.rs
//
// Event persistence, scoped by owner on every statement.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{Event, EventUpdate, EventWithVenues, OwnerId, SportFilter};
use crate::error::{AppError, AppResult};
use crate::repositories::event_venue_links::{link_venues, replace_venues, venues_by_event};
use crate::repositories::rows::{
    like_pattern, search_term, sport_column, timestamp_column, timestamp_to_sql, uuid_column,
    ColumnUpdates,
};

/// Filters for listing events. Both compose with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    /// Case-insensitive substring of the event name
    pub search: Option<String>,
    pub sport: SportFilter,
}

#[cfg_attr(test, mockall::automock)]
pub trait EventRepository: Send + Sync {
    fn list(&self, owner: OwnerId, query: &EventQuery) -> AppResult<Vec<EventWithVenues>>;
    fn get(&self, owner: OwnerId, id: Uuid) -> AppResult<Option<EventWithVenues>>;
    /// Insert the event and its venue links in one transaction.
    /// Returns the number of distinct venues linked.
    fn insert(&self, event: &Event, venue_ids: &[Uuid]) -> AppResult<usize>;
    /// Write only the supplied columns; `Some(ids)` also replaces every venue link
    fn update(
        &self,
        owner: OwnerId,
        id: Uuid,
        changes: &EventUpdate,
        updated_at: DateTime<Utc>,
        venue_ids: Option<Vec<Uuid>>,
    ) -> AppResult<()>;
    fn delete(&self, owner: OwnerId, id: Uuid) -> AppResult<()>;
    fn count(&self, owner: OwnerId) -> AppResult<i64>;
}

pub struct SqliteEventRepository {
    pool: Arc<ConnectionPool>,
}

const EVENT_COLUMNS: &str =
    "e.id, e.owner_id, e.name, e.sport_type, e.date_time, e.description, e.created_at, e.updated_at";

impl SqliteEventRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_event(row: &Row) -> rusqlite::Result<Event> {
        Ok(Event {
            id: uuid_column(row, "id")?,
            owner_id: OwnerId::new(uuid_column(row, "owner_id")?),
            name: row.get("name")?,
            sport_type: sport_column(row, "sport_type")?,
            date_time: timestamp_column(row, "date_time")?,
            description: row.get("description")?,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        })
    }

    /// Attach linked venues to each event
    fn with_venues(
        conn: &Connection,
        owner: OwnerId,
        events: Vec<Event>,
    ) -> AppResult<Vec<EventWithVenues>> {
        let ids: Vec<Uuid> = events.iter().map(|e| e.id).collect();
        let mut venues = venues_by_event(conn, owner, &ids)?;

        Ok(events
            .into_iter()
            .map(|event| EventWithVenues {
                venues: venues.remove(&event.id).unwrap_or_default(),
                event,
            })
            .collect())
    }
}

impl EventRepository for SqliteEventRepository {
    fn list(&self, owner: OwnerId, query: &EventQuery) -> AppResult<Vec<EventWithVenues>> {
        let conn = self.pool.get()?;

        let mut sql = format!("SELECT {} FROM events e WHERE e.owner_id = ?1", EVENT_COLUMNS);
        let mut values = vec![Value::Text(owner.to_string())];

        if let Some(term) = search_term(query.search.as_deref()) {
            values.push(Value::Text(like_pattern(term)));
            sql.push_str(&format!(
                " AND lower_unicode(e.name) LIKE ?{} ESCAPE '\\'",
                values.len()
            ));
        }

        if let Some(sport) = query.sport.sport() {
            values.push(Value::Text(sport.as_str().to_string()));
            sql.push_str(&format!(" AND e.sport_type = ?{}", values.len()));
        }

        sql.push_str(" ORDER BY e.date_time ASC, e.created_at ASC");

        let mut stmt = conn.prepare(&sql)?;
        let events: Vec<Event> = stmt
            .query_map(params_from_iter(values), Self::row_to_event)?
            .collect::<Result<Vec<_>, _>>()?;

        Self::with_venues(&conn, owner, events)
    }

    fn get(&self, owner: OwnerId, id: Uuid) -> AppResult<Option<EventWithVenues>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM events e WHERE e.id = ?1 AND e.owner_id = ?2",
            EVENT_COLUMNS
        ))?;

        let event = match stmt.query_row(params![id.to_string(), owner.to_string()], Self::row_to_event)
        {
            Ok(event) => event,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(AppError::Database(e)),
        };

        Ok(Self::with_venues(&conn, owner, vec![event])?.pop())
    }

    fn insert(&self, event: &Event, venue_ids: &[Uuid]) -> AppResult<usize> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            "INSERT INTO events (
                id, owner_id, name, sport_type, date_time, description, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                event.id.to_string(),
                event.owner_id.to_string(),
                event.name,
                event.sport_type.as_str(),
                timestamp_to_sql(&event.date_time),
                event.description,
                timestamp_to_sql(&event.created_at),
                timestamp_to_sql(&event.updated_at),
            ],
        )?;

        let linked = link_venues(&tx, event.owner_id, event.id, venue_ids)?;

        tx.commit()?;
        Ok(linked)
    }

    fn update(
        &self,
        owner: OwnerId,
        id: Uuid,
        changes: &EventUpdate,
        updated_at: DateTime<Utc>,
        venue_ids: Option<Vec<Uuid>>,
    ) -> AppResult<()> {
        let mut columns = ColumnUpdates::default();
        if let Some(name) = &changes.name {
            columns.set_text("name", Some(name));
        }
        if let Some(sport) = changes.sport_type {
            columns.set_text("sport_type", Some(sport.as_str()));
        }
        if let Some(date_time) = &changes.date_time {
            columns.set_text("date_time", Some(&timestamp_to_sql(date_time)));
        }
        if let Some(description) = &changes.description {
            columns.set_text("description", description.as_deref());
        }
        let (sql, values) = columns.into_statement("events", &updated_at, id, owner);

        let mut conn = self.pool.get()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let rows_affected = tx.execute(&sql, params_from_iter(values))?;
        if rows_affected == 0 {
            return Err(AppError::NotFoundOrForbidden);
        }

        if let Some(venue_ids) = venue_ids {
            replace_venues(&tx, owner, id, &venue_ids)?;
        }

        tx.commit()?;
        Ok(())
    }

    fn delete(&self, owner: OwnerId, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        // event_venues rows go with it (ON DELETE CASCADE)
        let rows_affected = conn.execute(
            "DELETE FROM events WHERE id = ?1 AND owner_id = ?2",
            params![id.to_string(), owner.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFoundOrForbidden);
        }

        Ok(())
    }

    fn count(&self, owner: OwnerId) -> AppResult<i64> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM events WHERE owner_id = ?1",
            params![owner.to_string()],
            |row| row.get(0),
        )?;

        Ok(count)
    }
}
