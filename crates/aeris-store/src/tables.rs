//! Row-level SQL for the four weather tables.
//!
//! These take a plain `&Connection` so they work the same inside the seed
//! transaction and behind the DAO's lock.

use rusqlite::{params, Connection, OptionalExtension, Row};

use aeris_weather::{City, CityId, CityWithConditions, CurrentConditions, DailyForecast, HourlyForecast};

/// Ids of 0 or less mean "let the store assign one"
fn assigned(id: i64) -> Option<i64> {
    (id > 0).then_some(id)
}

fn city_from_row(row: &Row<'_>) -> rusqlite::Result<City> {
    Ok(City {
        id: row.get(0)?,
        name: row.get(1)?,
        latitude: row.get(2)?,
        longitude: row.get(3)?,
    })
}

/// Maps the eleven condition columns starting at `offset`
fn conditions_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<CurrentConditions> {
    Ok(CurrentConditions {
        id: row.get(offset)?,
        city_id: row.get(offset + 1)?,
        temperature: row.get(offset + 2)?,
        description: row.get(offset + 3)?,
        icon_code: row.get(offset + 4)?,
        temp_high: row.get(offset + 5)?,
        temp_low: row.get(offset + 6)?,
        humidity: row.get(offset + 7)?,
        wind_speed: row.get(offset + 8)?,
        uv_index: row.get(offset + 9)?,
        precipitation: row.get(offset + 10)?,
    })
}

/// Insert a city, or update the row with the same id. Returns the city's id.
pub fn insert_city(conn: &Connection, city: &City) -> rusqlite::Result<CityId> {
    conn.execute(
        "INSERT INTO cities (id, name, latitude, longitude)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            latitude = excluded.latitude,
            longitude = excluded.longitude",
        params![assigned(city.id), city.name, city.latitude, city.longitude],
    )?;

    match assigned(city.id) {
        Some(id) => Ok(id),
        None => Ok(conn.last_insert_rowid()),
    }
}

/// Insert conditions, replacing any row with the same id or the same city
pub fn insert_current_conditions(
    conn: &Connection,
    conditions: &CurrentConditions,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO current_conditions
            (id, city_id, temperature, description, icon_code, temp_high, temp_low,
             humidity, wind_speed, uv_index, precipitation)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            assigned(conditions.id),
            conditions.city_id,
            conditions.temperature,
            conditions.description,
            conditions.icon_code,
            conditions.temp_high,
            conditions.temp_low,
            conditions.humidity,
            conditions.wind_speed,
            conditions.uv_index,
            conditions.precipitation,
        ],
    )?;
    Ok(())
}

pub fn insert_hourly(conn: &Connection, rows: &[HourlyForecast]) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT OR REPLACE INTO hourly_forecasts (id, city_id, hour, temperature, icon_code)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for row in rows {
        stmt.execute(params![
            assigned(row.id),
            row.city_id,
            row.hour,
            row.temperature,
            row.icon_code,
        ])?;
    }
    Ok(())
}

pub fn insert_daily(conn: &Connection, rows: &[DailyForecast]) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT OR REPLACE INTO daily_forecasts (id, city_id, day_name, temp_high, temp_low, icon_code)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    for row in rows {
        stmt.execute(params![
            assigned(row.id),
            row.city_id,
            row.day_name,
            row.temp_high,
            row.temp_low,
            row.icon_code,
        ])?;
    }
    Ok(())
}

/// Delete a city. Its weather rows go with it through the foreign keys.
pub fn delete_city(conn: &Connection, city_id: CityId) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM cities WHERE id = ?1", [city_id])
}

pub fn select_city(conn: &Connection, city_id: CityId) -> rusqlite::Result<Option<City>> {
    conn.query_row(
        "SELECT id, name, latitude, longitude FROM cities WHERE id = ?1",
        params![city_id],
        city_from_row,
    )
    .optional()
}

pub fn select_cities(conn: &Connection) -> rusqlite::Result<Vec<City>> {
    let mut stmt =
        conn.prepare_cached("SELECT id, name, latitude, longitude FROM cities ORDER BY id")?;
    let cities = stmt.query_map([], city_from_row)?.collect::<Result<Vec<_>, _>>()?;
    Ok(cities)
}

pub fn select_current_conditions(
    conn: &Connection,
    city_id: CityId,
) -> rusqlite::Result<Option<CurrentConditions>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, city_id, temperature, description, icon_code, temp_high, temp_low,
                humidity, wind_speed, uv_index, precipitation
         FROM current_conditions WHERE city_id = ?1",
    )?;
    stmt.query_row([city_id], |row| conditions_from_row(row, 0)).optional()
}

pub fn select_hourly(conn: &Connection, city_id: CityId) -> rusqlite::Result<Vec<HourlyForecast>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, city_id, hour, temperature, icon_code
         FROM hourly_forecasts WHERE city_id = ?1 ORDER BY id",
    )?;
    let rows = stmt
        .query_map([city_id], |row| {
            Ok(HourlyForecast {
                id: row.get(0)?,
                city_id: row.get(1)?,
                hour: row.get(2)?,
                temperature: row.get(3)?,
                icon_code: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn select_daily(conn: &Connection, city_id: CityId) -> rusqlite::Result<Vec<DailyForecast>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, city_id, day_name, temp_high, temp_low, icon_code
         FROM daily_forecasts WHERE city_id = ?1 ORDER BY id",
    )?;
    let rows = stmt
        .query_map([city_id], |row| {
            Ok(DailyForecast {
                id: row.get(0)?,
                city_id: row.get(1)?,
                day_name: row.get(2)?,
                temp_high: row.get(3)?,
                temp_low: row.get(4)?,
                icon_code: row.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Every city with its conditions, `None` where a city has no conditions row
pub fn select_cities_with_conditions(
    conn: &Connection,
) -> rusqlite::Result<Vec<CityWithConditions>> {
    let mut stmt = conn.prepare_cached(
        "SELECT c.id, c.name, c.latitude, c.longitude,
                w.id, w.city_id, w.temperature, w.description, w.icon_code, w.temp_high,
                w.temp_low, w.humidity, w.wind_speed, w.uv_index, w.precipitation
         FROM cities c
         LEFT JOIN current_conditions w ON w.city_id = c.id
         ORDER BY c.id",
    )?;
    let rows = stmt
        .query_map([], |row| {
            let city = city_from_row(row)?;
            let conditions = match row.get::<_, Option<i64>>(4)? {
                Some(_) => Some(conditions_from_row(row, 4)?),
                None => None,
            };
            Ok(CityWithConditions { city, conditions })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
