//! Repository facade the view models talk to.
//!
//! Reads pass straight through to the DAO. Writes run on the blocking pool
//! so callers on an async thread never wait on SQLite.

use aeris_weather::{City, CityId, CityWithConditions, CurrentConditions, DailyForecast, HourlyForecast};

use crate::dao::WeatherDao;
use crate::error::Result;
use crate::live::LiveQuery;

#[derive(Debug, Clone)]
pub struct WeatherRepository {
    dao: WeatherDao,
}

impl WeatherRepository {
    pub fn new(dao: WeatherDao) -> Self {
        Self { dao }
    }

    /// One city as stored right now, `None` if there is no such id
    pub fn city(&self, city_id: CityId) -> Result<Option<City>> {
        self.dao.city(city_id)
    }

    /// Every city as stored right now, ordered by id
    pub fn cities(&self) -> Result<Vec<City>> {
        self.dao.cities()
    }

    pub fn all_cities(&self) -> Result<LiveQuery<Vec<City>>> {
        self.dao.observe_cities()
    }

    pub fn current_conditions(
        &self,
        city_id: CityId,
    ) -> Result<LiveQuery<Option<CurrentConditions>>> {
        self.dao.observe_current_conditions(city_id)
    }

    pub fn hourly_forecast(&self, city_id: CityId) -> Result<LiveQuery<Vec<HourlyForecast>>> {
        self.dao.observe_hourly_forecast(city_id)
    }

    pub fn daily_forecast(&self, city_id: CityId) -> Result<LiveQuery<Vec<DailyForecast>>> {
        self.dao.observe_daily_forecast(city_id)
    }

    pub fn cities_with_conditions(&self) -> Result<LiveQuery<Vec<CityWithConditions>>> {
        self.dao.observe_cities_with_conditions()
    }

    pub async fn insert_city(&self, city: City) -> Result<CityId> {
        let dao = self.dao.clone();
        tokio::task::spawn_blocking(move || dao.insert_city(&city)).await?
    }

    pub async fn insert_current_conditions(&self, conditions: CurrentConditions) -> Result<()> {
        let dao = self.dao.clone();
        tokio::task::spawn_blocking(move || dao.insert_current_conditions(&conditions)).await?
    }

    pub async fn insert_hourly_forecast(&self, rows: Vec<HourlyForecast>) -> Result<()> {
        let dao = self.dao.clone();
        tokio::task::spawn_blocking(move || dao.insert_hourly_forecast(&rows)).await?
    }

    pub async fn insert_daily_forecast(&self, rows: Vec<DailyForecast>) -> Result<()> {
        let dao = self.dao.clone();
        tokio::task::spawn_blocking(move || dao.insert_daily_forecast(&rows)).await?
    }

    pub async fn delete_city(&self, city_id: CityId) -> Result<bool> {
        let dao = self.dao.clone();
        tokio::task::spawn_blocking(move || dao.delete_city(city_id)).await?
    }
}
