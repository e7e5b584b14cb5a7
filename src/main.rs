// src/main.rs
//
// Store bootstrap: open the configured database, bring the schema up to date,
// check integrity and print a short summary.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};

use matchday::config::AppConfig;
use matchday::db::{create_connection_pool, get_connection, get_database_stats, verify_database_integrity};
use matchday::events::ViewsInvalidated;
use matchday::logging::init_logging;
use matchday::AppState;

fn main() -> Result<()> {
    // 1. CONFIGURATION
    let config = AppConfig::from_env().context("failed to load configuration")?;

    // 2. LOGGING
    init_logging(&config.log_level, &config.log_dir).map_err(|e| anyhow!(e))?;

    // 3. STORE
    let pool = Arc::new(create_connection_pool(&config).context("failed to open database")?);
    let state = AppState::from_pool(pool.clone()).context("failed to initialize schema")?;

    state.event_bus.subscribe::<ViewsInvalidated, _>(|event| {
        log::debug!(
            "event=views_invalidated module=main owner={} paths={}",
            event.owner_id,
            event.paths.join(",")
        );
    });

    let stats = {
        let conn = get_connection(&pool)?;
        verify_database_integrity(&conn).context("integrity check failed")?;
        get_database_stats(&conn)?
    };

    log::info!(
        "event=store_ready module=main path={} events={} venues={} links={}",
        config.database_path.display(),
        stats.event_count,
        stats.venue_count,
        stats.link_count
    );

    println!("database: {}", config.database_path.display());
    println!("size:     {} bytes ({} pages)", stats.size_bytes, stats.page_count);
    println!("events:   {}", stats.event_count);
    println!("venues:   {}", stats.venue_count);
    println!("links:    {}", stats.link_count);

    Ok(())
}
