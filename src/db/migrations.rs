// src/db/migrations.rs
//
// Schema versioning
//
// PRINCIPLES:
// - Every migration has an explicit version
// - Each migration runs in its own transaction together with its version row
// - A database newer than this build is refused, never touched

use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection};

use crate::error::{AppError, AppResult};

struct Migration {
    version: i32,
    name: &'static str,
    sql: &'static str,
}

/// Ordered by version, no gaps
const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial schema",
    sql: include_str!("schema.sql"),
}];

fn latest_version() -> i32 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}

/// Bring the schema up to the latest version.
///
/// Safe to call on every start.
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    let current = schema_version(conn)?;
    let latest = latest_version();

    if current > latest {
        return Err(AppError::Other(format!(
            "Schema version {} is newer than supported {}. Update the application.",
            current, latest
        )));
    }

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        apply_migration(conn, migration)?;
    }

    Ok(())
}

/// 0 for a fresh database
fn schema_version(conn: &Connection) -> AppResult<i32> {
    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;

    Ok(version.unwrap_or(0))
}

fn record_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, ?2)",
        params![version, Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)],
    )?;

    Ok(())
}

fn apply_migration(conn: &Connection, migration: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(migration.sql).map_err(|e| {
        AppError::Other(format!(
            "Failed to apply migration {} ({}): {}",
            migration.version, migration.name, e
        ))
    })?;
    record_version(&tx, migration.version)?;
    tx.commit()?;

    log::info!(
        "event=schema_migrated module=db status=ok version={} name={}",
        migration.version,
        migration.name
    );

    Ok(())
}

/// Verify database integrity
///
/// Runs SQLite's integrity check.
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let result: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

    if result != "ok" {
        return Err(AppError::Other(format!(
            "Database integrity check failed: {}",
            result
        )));
    }

    Ok(())
}

/// Get database statistics across all owners
pub fn get_database_stats(conn: &Connection) -> AppResult<DatabaseStats> {
    let page_count: i64 = conn.query_row("PRAGMA page_count", [], |row| row.get(0))?;
    let page_size: i64 = conn.query_row("PRAGMA page_size", [], |row| row.get(0))?;

    let event_count: i64 = conn.query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
    let venue_count: i64 = conn.query_row("SELECT COUNT(*) FROM venues", [], |row| row.get(0))?;
    let link_count: i64 =
        conn.query_row("SELECT COUNT(*) FROM event_venues", [], |row| row.get(0))?;

    Ok(DatabaseStats {
        size_bytes: page_count * page_size,
        page_count,
        page_size,
        event_count,
        venue_count,
        link_count,
    })
}

/// Database statistics
#[derive(Debug)]
pub struct DatabaseStats {
    pub size_bytes: i64,
    pub page_count: i64,
    pub page_size: i64,
    pub event_count: i64,
    pub venue_count: i64,
    pub link_count: i64,
}
