// src/repositories/venue_repository.rs
//
// Venue persistence, scoped by owner on every statement.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter};
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{OwnerId, SportFilter, Venue, VenueUpdate};
use crate::error::{AppError, AppResult};
use crate::repositories::event_venue_links::venues_by_event;
use crate::repositories::rows::{
    like_pattern, row_to_venue, search_term, sports_to_sql, timestamp_to_sql, ColumnUpdates,
    VENUE_COLUMNS,
};

/// Filters for listing venues. Both compose with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueQuery {
    /// Case-insensitive substring of the venue name
    pub search: Option<String>,
    /// Keep venues whose supported sports contain this one
    pub sport: SportFilter,
}

#[cfg_attr(test, mockall::automock)]
pub trait VenueRepository: Send + Sync {
    fn list(&self, owner: OwnerId, query: &VenueQuery) -> AppResult<Vec<Venue>>;
    fn get(&self, owner: OwnerId, id: Uuid) -> AppResult<Option<Venue>>;
    fn insert(&self, venue: &Venue) -> AppResult<()>;
    /// Write only the supplied columns
    fn update(
        &self,
        owner: OwnerId,
        id: Uuid,
        changes: &VenueUpdate,
        updated_at: DateTime<Utc>,
    ) -> AppResult<()>;
    fn delete(&self, owner: OwnerId, id: Uuid) -> AppResult<()>;
    fn list_for_event(&self, owner: OwnerId, event_id: Uuid) -> AppResult<Vec<Venue>>;
}

pub struct SqliteVenueRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteVenueRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl VenueRepository for SqliteVenueRepository {
    fn list(&self, owner: OwnerId, query: &VenueQuery) -> AppResult<Vec<Venue>> {
        let conn = self.pool.get()?;

        let mut sql = format!("SELECT {} FROM venues v WHERE v.owner_id = ?1", VENUE_COLUMNS);
        let mut values = vec![Value::Text(owner.to_string())];

        if let Some(term) = search_term(query.search.as_deref()) {
            values.push(Value::Text(like_pattern(term)));
            sql.push_str(&format!(
                " AND lower_unicode(v.name) LIKE ?{} ESCAPE '\\'",
                values.len()
            ));
        }

        if let Some(sport) = query.sport.sport() {
            values.push(Value::Text(sport.as_str().to_string()));
            sql.push_str(&format!(
                " AND EXISTS (SELECT 1 FROM json_each(v.supported_sports) s WHERE s.value = ?{})",
                values.len()
            ));
        }

        sql.push_str(" ORDER BY v.name ASC, v.created_at ASC");

        let mut stmt = conn.prepare(&sql)?;
        let venues: Vec<Venue> = stmt
            .query_map(params_from_iter(values), row_to_venue)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(venues)
    }

    fn get(&self, owner: OwnerId, id: Uuid) -> AppResult<Option<Venue>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM venues v WHERE v.id = ?1 AND v.owner_id = ?2",
            VENUE_COLUMNS
        ))?;

        match stmt.query_row(params![id.to_string(), owner.to_string()], row_to_venue) {
            Ok(venue) => Ok(Some(venue)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn insert(&self, venue: &Venue) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO venues (
                id, owner_id, name, address, city, state, postal_code,
                capacity, supported_sports, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                venue.id.to_string(),
                venue.owner_id.to_string(),
                venue.name,
                venue.address,
                venue.city,
                venue.state,
                venue.postal_code,
                venue.capacity.map(i64::from),
                sports_to_sql(&venue.supported_sports)?,
                timestamp_to_sql(&venue.created_at),
                timestamp_to_sql(&venue.updated_at),
            ],
        )?;

        Ok(())
    }

    fn update(
        &self,
        owner: OwnerId,
        id: Uuid,
        changes: &VenueUpdate,
        updated_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut columns = ColumnUpdates::default();
        if let Some(name) = &changes.name {
            columns.set_text("name", Some(name));
        }
        for (column, value) in [
            ("address", &changes.address),
            ("city", &changes.city),
            ("state", &changes.state),
            ("postal_code", &changes.postal_code),
        ] {
            if let Some(value) = value {
                columns.set_text(column, value.as_deref());
            }
        }
        if let Some(capacity) = changes.capacity {
            columns.set(
                "capacity",
                capacity.map_or(Value::Null, |c| Value::Integer(i64::from(c))),
            );
        }
        if let Some(sports) = &changes.supported_sports {
            columns.set("supported_sports", Value::Text(sports_to_sql(sports)?));
        }
        let (sql, values) = columns.into_statement("venues", &updated_at, id, owner);

        let conn = self.pool.get()?;
        let rows_affected = conn.execute(&sql, params_from_iter(values))?;

        if rows_affected == 0 {
            return Err(AppError::NotFoundOrForbidden);
        }

        Ok(())
    }

    fn delete(&self, owner: OwnerId, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "DELETE FROM venues WHERE id = ?1 AND owner_id = ?2",
            params![id.to_string(), owner.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFoundOrForbidden);
        }

        Ok(())
    }

    fn list_for_event(&self, owner: OwnerId, event_id: Uuid) -> AppResult<Vec<Venue>> {
        let conn = self.pool.get()?;
        let mut grouped = venues_by_event(&conn, owner, &[event_id])?;
        Ok(grouped.remove(&event_id).unwrap_or_default())
    }
}
