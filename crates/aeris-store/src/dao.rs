//! Typed queries and writes over the weather tables.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use rusqlite::Connection;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tracing::{debug, info};

use aeris_weather::{City, CityId, CityWithConditions, CurrentConditions, DailyForecast, HourlyForecast};

use crate::error::{Error, Result};
use crate::live::{LiveQuery, Table};
use crate::schema::{self, OpenOutcome};
use crate::tables;

/// Pending invalidations each live query can fall behind by before it is
/// told it lagged
const INVALIDATION_CAPACITY: usize = 64;

/// Data access object for the weather database.
///
/// Cloning is cheap: clones share the connection and the invalidation
/// channel. Every write notifies the tables it touched, which refreshes the
/// live queries reading them.
#[derive(Clone)]
pub struct WeatherDao {
    conn: Arc<Mutex<Connection>>,
    invalidations: broadcast::Sender<Table>,
    runtime: Handle,
}

impl std::fmt::Debug for WeatherDao {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherDao").finish_non_exhaustive()
    }
}

impl WeatherDao {
    /// Open or create the database at `path`, seeding it on first creation.
    ///
    /// Live queries refresh on `runtime`.
    pub fn open(path: impl AsRef<Path>, runtime: Handle) -> Result<(Self, OpenOutcome)> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        info!("Opening weather database at {}", path.display());
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;",
        )?;

        Self::from_connection(conn, runtime)
    }

    /// In-memory database, seeded like a fresh file
    pub fn open_in_memory(runtime: Handle) -> Result<(Self, OpenOutcome)> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Self::from_connection(conn, runtime)
    }

    fn from_connection(mut conn: Connection, runtime: Handle) -> Result<(Self, OpenOutcome)> {
        let outcome = schema::initialize(&mut conn)?;
        debug!("Weather database ready: {:?}", outcome);

        let (invalidations, _) = broadcast::channel(INVALIDATION_CAPACITY);
        let dao = Self {
            conn: Arc::new(Mutex::new(conn)),
            invalidations,
            runtime,
        };
        Ok((dao, outcome))
    }

    fn notify(&self, tables: &[Table]) {
        for table in tables {
            // No receivers just means nothing is observing
            let _ = self.invalidations.send(*table);
        }
    }

    fn live<T, F>(&self, depends_on: &'static [Table], query: F) -> Result<LiveQuery<T>>
    where
        T: Clone + PartialEq + Send + Sync + 'static,
        F: Fn(&Connection) -> rusqlite::Result<T> + Send + Sync + 'static,
    {
        let conn = Arc::clone(&self.conn);
        LiveQuery::start(
            &self.runtime,
            self.invalidations.subscribe(),
            depends_on,
            move || Ok(query(&*conn.lock())?),
        )
    }

    // =========== Snapshots ===========

    pub fn city(&self, city_id: CityId) -> Result<Option<City>> {
        Ok(tables::select_city(&self.conn.lock(), city_id)?)
    }

    pub fn cities(&self) -> Result<Vec<City>> {
        Ok(tables::select_cities(&self.conn.lock())?)
    }

    pub fn current_conditions(&self, city_id: CityId) -> Result<Option<CurrentConditions>> {
        Ok(tables::select_current_conditions(&self.conn.lock(), city_id)?)
    }

    pub fn hourly_forecast(&self, city_id: CityId) -> Result<Vec<HourlyForecast>> {
        Ok(tables::select_hourly(&self.conn.lock(), city_id)?)
    }

    pub fn daily_forecast(&self, city_id: CityId) -> Result<Vec<DailyForecast>> {
        Ok(tables::select_daily(&self.conn.lock(), city_id)?)
    }

    pub fn cities_with_conditions(&self) -> Result<Vec<CityWithConditions>> {
        Ok(tables::select_cities_with_conditions(&self.conn.lock())?)
    }

    // =========== Live queries ===========

    /// All cities, ordered by id
    pub fn observe_cities(&self) -> Result<LiveQuery<Vec<City>>> {
        self.live(&[Table::Cities], tables::select_cities)
    }

    /// Conditions for one city, `None` when it has none
    pub fn observe_current_conditions(
        &self,
        city_id: CityId,
    ) -> Result<LiveQuery<Option<CurrentConditions>>> {
        self.live(&[Table::CurrentConditions], move |conn| {
            tables::select_current_conditions(conn, city_id)
        })
    }

    /// Hourly rows for one city, ordered by row id
    pub fn observe_hourly_forecast(
        &self,
        city_id: CityId,
    ) -> Result<LiveQuery<Vec<HourlyForecast>>> {
        self.live(&[Table::HourlyForecasts], move |conn| {
            tables::select_hourly(conn, city_id)
        })
    }

    /// Daily rows for one city, ordered by row id
    pub fn observe_daily_forecast(&self, city_id: CityId) -> Result<LiveQuery<Vec<DailyForecast>>> {
        self.live(&[Table::DailyForecasts], move |conn| {
            tables::select_daily(conn, city_id)
        })
    }

    /// Every city paired with its conditions
    pub fn observe_cities_with_conditions(&self) -> Result<LiveQuery<Vec<CityWithConditions>>> {
        self.live(
            &[Table::Cities, Table::CurrentConditions],
            tables::select_cities_with_conditions,
        )
    }

    // =========== Writes ===========

    /// Insert or update a city, returning its id
    pub fn insert_city(&self, city: &City) -> Result<CityId> {
        let id = tables::insert_city(&self.conn.lock(), city)?;
        self.notify(&[Table::Cities]);
        Ok(id)
    }

    pub fn insert_current_conditions(&self, conditions: &CurrentConditions) -> Result<()> {
        tables::insert_current_conditions(&self.conn.lock(), conditions)?;
        self.notify(&[Table::CurrentConditions]);
        Ok(())
    }

    /// Insert a batch of hourly rows atomically
    pub fn insert_hourly_forecast(&self, rows: &[HourlyForecast]) -> Result<()> {
        {
            let mut conn = self.conn.lock();
            let tx = conn.transaction()?;
            tables::insert_hourly(&tx, rows)?;
            tx.commit()?;
        }
        self.notify(&[Table::HourlyForecasts]);
        Ok(())
    }

    /// Insert a batch of daily rows atomically
    pub fn insert_daily_forecast(&self, rows: &[DailyForecast]) -> Result<()> {
        {
            let mut conn = self.conn.lock();
            let tx = conn.transaction()?;
            tables::insert_daily(&tx, rows)?;
            tx.commit()?;
        }
        self.notify(&[Table::DailyForecasts]);
        Ok(())
    }

    /// Delete a city and, by cascade, all of its weather rows.
    /// Returns whether a city was deleted.
    pub fn delete_city(&self, city_id: CityId) -> Result<bool> {
        let deleted = tables::delete_city(&self.conn.lock(), city_id)? > 0;
        if deleted {
            self.notify(&Table::ALL);
        }
        Ok(deleted)
    }
}
