//! Database schema, versioning and first-run seeding.

use rusqlite::{params, Connection, OptionalExtension, Transaction};
use tracing::{debug, info, warn};

use aeris_weather::SEED_CITIES;

use crate::error::{Error, Result};
use crate::tables;

/// Current schema version. Any other stored version is discarded.
pub const SCHEMA_VERSION: i32 = 6;

/// What opening the database did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// New database, schema created and seeded
    Created,
    /// Existing database at the current version, left untouched
    Opened,
    /// Database at another version, dropped and recreated
    Recreated { from: i32 },
}

/// Bring the database to [`SCHEMA_VERSION`].
///
/// Creation, seeding and the version marker share one transaction, so an
/// interrupted first run leaves nothing behind and seeds again next time.
pub fn initialize(conn: &mut Connection) -> Result<OpenOutcome> {
    let version = schema_version(conn)?;
    if version == SCHEMA_VERSION {
        debug!("Schema at version {}", version);
        return Ok(OpenOutcome::Opened);
    }

    let tx = conn.transaction()?;
    let outcome = if version == 0 {
        info!("Creating weather schema v{}", SCHEMA_VERSION);
        OpenOutcome::Created
    } else {
        warn!(
            "Schema version {} does not match {}, discarding stored data",
            version, SCHEMA_VERSION
        );
        drop_schema(&tx)?;
        OpenOutcome::Recreated { from: version }
    };

    create_schema(&tx)?;
    seed(&tx)?;
    set_schema_version(&tx, SCHEMA_VERSION)?;
    tx.commit()?;

    Ok(outcome)
}

/// Stored version, 0 when the database has never been initialized
fn schema_version(conn: &Connection) -> Result<i32> {
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='schema_version'",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| row.get(0))
        .optional()?
        .unwrap_or(0);

    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", params![version])?;
    Ok(())
}

fn drop_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "DROP TABLE IF EXISTS daily_forecasts;
         DROP TABLE IF EXISTS hourly_forecasts;
         DROP TABLE IF EXISTS current_conditions;
         DROP TABLE IF EXISTS cities;
         DROP TABLE IF EXISTS schema_version;",
    )?;
    Ok(())
}

fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);

        CREATE TABLE IF NOT EXISTS cities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL
        );

        CREATE TABLE IF NOT EXISTS current_conditions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            city_id INTEGER NOT NULL UNIQUE REFERENCES cities(id) ON DELETE CASCADE,
            temperature REAL NOT NULL,
            description TEXT NOT NULL,
            icon_code TEXT NOT NULL,
            temp_high REAL NOT NULL,
            temp_low REAL NOT NULL,
            humidity REAL NOT NULL,
            wind_speed REAL NOT NULL,
            uv_index REAL NOT NULL,
            precipitation INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS hourly_forecasts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            city_id INTEGER NOT NULL REFERENCES cities(id) ON DELETE CASCADE,
            hour TEXT NOT NULL,
            temperature REAL NOT NULL,
            icon_code TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS daily_forecasts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            city_id INTEGER NOT NULL REFERENCES cities(id) ON DELETE CASCADE,
            day_name TEXT NOT NULL,
            temp_high REAL NOT NULL,
            temp_low REAL NOT NULL,
            icon_code TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_hourly_city ON hourly_forecasts(city_id);
        CREATE INDEX IF NOT EXISTS idx_daily_city ON daily_forecasts(city_id);",
    )?;
    Ok(())
}

/// Insert the fixed cities and their synthetic weather
fn seed(tx: &Transaction<'_>) -> Result<()> {
    for seed in SEED_CITIES.iter() {
        let seed_err = |source| Error::Seed {
            city: seed.name.to_string(),
            source,
        };

        let city_id = tables::insert_city(tx, &seed.city()).map_err(seed_err)?;
        tables::insert_current_conditions(tx, &seed.current_conditions(city_id))
            .map_err(seed_err)?;
        tables::insert_hourly(tx, &seed.hourly_forecast(city_id)).map_err(seed_err)?;
        tables::insert_daily(tx, &seed.daily_forecast(city_id)).map_err(seed_err)?;
    }

    info!("Seeded {} cities", SEED_CITIES.len());
    Ok(())
}
