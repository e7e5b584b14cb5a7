// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Foreign keys on for every connection (event_venues cascades rely on it)
// - Every connection carries the same SQL functions

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Register `lower_unicode(text)`, a full Unicode lowercase.
/// Built-in `lower()` and `LIKE` fold ASCII letters only.
pub fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "lower_unicode",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|v| v.to_lowercase()))
        },
    )
}

/// Create a connection pool for the configured database file
///
/// Every connection runs with:
/// - Foreign keys enabled
/// - WAL journal
/// - Busy timeout from config
/// - `lower_unicode` registered
pub fn create_connection_pool(config: &AppConfig) -> AppResult<ConnectionPool> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let busy_timeout = config.busy_timeout_ms;
    let manager = SqliteConnectionManager::file(&config.database_path).with_init(move |conn| {
        conn.execute_batch(&format!(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = {};",
            busy_timeout
        ))?;
        register_functions(conn)
    });

    let pool = Pool::builder()
        .max_size(config.pool_max_size)
        .build(manager)
        .map_err(|e| AppError::Pool(format!("Failed to create connection pool: {}", e)))?;

    log::info!(
        "event=pool_open module=db status=ok path={} max_size={}",
        config.database_path.display(),
        config.pool_max_size
    );

    Ok(pool)
}

/// Create a pool over a private in-memory database (for testing)
///
/// The pool holds a single connection so the shared-cache database stays alive
/// and callers never contend on table locks.
pub fn create_test_pool() -> AppResult<ConnectionPool> {
    let uri = format!("file:matchday-{}?mode=memory&cache=shared", Uuid::new_v4());
    let manager = SqliteConnectionManager::file(uri).with_init(|conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        register_functions(conn)
    });

    Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| AppError::Pool(format!("Failed to create test pool: {}", e)))
}

/// Get a connection from the pool
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}

/// Create a standalone in-memory connection (for testing)
pub fn create_test_connection() -> AppResult<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    register_functions(&conn)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_pool_enables_foreign_keys() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::rooted_at(dir.path().join("nested"));
        let pool = create_connection_pool(&config).unwrap();
        let conn = get_connection(&pool).unwrap();

        let fk_enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);
        assert!(config.database_path.exists());

        let folded: String = conn
            .query_row("SELECT lower_unicode('ÉTOILE')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(folded, "étoile");
    }

    #[test]
    fn test_lower_unicode_on_test_pool() {
        let pool = create_test_pool().unwrap();
        let conn = get_connection(&pool).unwrap();

        let (folded, null): (String, Option<String>) = conn
            .query_row(
                "SELECT lower_unicode('ÖLSTADION Ärena'), lower_unicode(NULL)",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(folded, "ölstadion ärena");
        assert_eq!(null, None);

        // Built-in LIKE alone misses the accented capital
        let builtin: bool = conn
            .query_row("SELECT 'Étoile' LIKE '%étoile%'", [], |row| row.get(0))
            .unwrap();
        assert!(!builtin);
    }

    #[test]
    fn test_test_pool_is_isolated() {
        let a = create_test_pool().unwrap();
        let b = create_test_pool().unwrap();

        get_connection(&a)
            .unwrap()
            .execute_batch("CREATE TABLE only_in_a (x INTEGER);")
            .unwrap();

        let count: i64 = get_connection(&b)
            .unwrap()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name = 'only_in_a'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_test_connection() {
        let conn = create_test_connection().unwrap();

        let fk_enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);
    }
}
