// src/repositories/rows.rs
//
// Column codecs shared by the SQLite repositories.
// Parse failures surface as FromSqlConversionFailure, never as silent defaults.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::Row;
use uuid::Uuid;

use crate::domain::{OwnerId, SportType, Venue};

fn conversion_error(column: &str, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        Type::Text,
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("column `{}`: {}", column, message),
        )),
    )
}

/// Timestamps are stored with fixed millisecond precision and a `Z` suffix,
/// so string order in SQL equals chronological order.
pub(crate) fn timestamp_to_sql(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn uuid_column(row: &Row, column: &str) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(column)?;
    Uuid::parse_str(&raw).map_err(|e| conversion_error(column, format!("invalid UUID '{}': {}", raw, e)))
}

pub(crate) fn timestamp_column(row: &Row, column: &str) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(column, format!("invalid timestamp '{}': {}", raw, e)))
}

pub(crate) fn sport_column(row: &Row, column: &str) -> rusqlite::Result<SportType> {
    let raw: String = row.get(column)?;
    raw.parse()
        .map_err(|e: crate::domain::DomainError| conversion_error(column, e.to_string()))
}

pub(crate) fn sports_to_sql(sports: &[SportType]) -> serde_json::Result<String> {
    serde_json::to_string(sports)
}

fn sports_column(row: &Row, column: &str) -> rusqlite::Result<Vec<SportType>> {
    let raw: String = row.get(column)?;
    serde_json::from_str(&raw).map_err(|e| conversion_error(column, e.to_string()))
}

/// Lowercased substring pattern for `lower_unicode(column) LIKE ? ESCAPE '\'`.
/// LIKE wildcards in the term match literally.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.to_lowercase().chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Search term as given, or `None` when empty. Surrounding spaces are part
/// of the substring.
pub(crate) fn search_term(search: Option<&str>) -> Option<&str> {
    search.filter(|s| !s.is_empty())
}

/// `UPDATE .. SET` over only the columns a partial update supplies.
/// `updated_at` is always written and never precedes `created_at`.
#[derive(Debug, Default)]
pub(crate) struct ColumnUpdates {
    assignments: Vec<String>,
    values: Vec<Value>,
}

impl ColumnUpdates {
    fn bind(&mut self, value: Value) -> usize {
        self.values.push(value);
        self.values.len()
    }

    pub(crate) fn set(&mut self, column: &str, value: Value) {
        let idx = self.bind(value);
        self.assignments.push(format!("{} = ?{}", column, idx));
    }

    pub(crate) fn set_text(&mut self, column: &str, value: Option<&str>) {
        self.set(column, value.map_or(Value::Null, |v| Value::Text(v.to_string())));
    }

    /// Finish into SQL and binds for the owner-scoped row `id`
    pub(crate) fn into_statement(
        mut self,
        table: &str,
        updated_at: &DateTime<Utc>,
        id: Uuid,
        owner: OwnerId,
    ) -> (String, Vec<Value>) {
        let stamp = self.bind(Value::Text(timestamp_to_sql(updated_at)));
        self.assignments
            .push(format!("updated_at = MAX(created_at, ?{})", stamp));

        let id_idx = self.bind(Value::Text(id.to_string()));
        let owner_idx = self.bind(Value::Text(owner.to_string()));

        // owner_id is never assigned
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{} AND owner_id = ?{}",
            table,
            self.assignments.join(", "),
            id_idx,
            owner_idx
        );
        (sql, self.values)
    }
}

pub(crate) const VENUE_COLUMNS: &str = "v.id, v.owner_id, v.name, v.address, v.city, v.state,
    v.postal_code, v.capacity, v.supported_sports, v.created_at, v.updated_at";

/// Map a row selected with `VENUE_COLUMNS` to a Venue
pub(crate) fn row_to_venue(row: &Row) -> rusqlite::Result<Venue> {
    let capacity: Option<i64> = row.get("capacity")?;
    let capacity = capacity
        .map(|c| u32::try_from(c).map_err(|e| conversion_error("capacity", e.to_string())))
        .transpose()?;

    Ok(Venue {
        id: uuid_column(row, "id")?,
        owner_id: OwnerId::new(uuid_column(row, "owner_id")?),
        name: row.get("name")?,
        address: row.get("address")?,
        city: row.get("city")?,
        state: row.get("state")?,
        postal_code: row.get("postal_code")?,
        capacity,
        supported_sports: sports_column(row, "supported_sports")?,
        created_at: timestamp_column(row, "created_at")?,
        updated_at: timestamp_column(row, "updated_at")?,
    })
}
