//! Application services container.
//!
//! Owns the tokio runtime, the opened weather store and the service channels.
//! Screens borrow what they need from here; session state is created per run
//! on the UI thread via [`AppServices::new_session`], always starting on a
//! stored city.

use std::sync::mpsc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::{Handle, Runtime};

use aeris_core::{AppError, Config, ConfigError};
use aeris_store::{OpenOutcome, WeatherDao, WeatherRepository};
use aeris_weather::{CityId, Language};

use crate::error_mapping::{core_language, store_error};
use crate::models::{LocationsViewModel, MainViewModel};
use crate::navigation::Preferences;
use crate::services::{request_current_location, LocationServiceMessage};
use crate::session::SessionState;

/// Time given to background tasks to finish on shutdown
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

pub struct AppServices {
    /// Tokio runtime for store refreshes and service requests
    runtime: Runtime,

    config: Config,
    repository: WeatherRepository,
    open_outcome: OpenOutcome,

    /// Configured primary city, or the first stored city when that id is
    /// not in the store
    primary_city_id: CityId,

    /// Location service channel
    location_tx: mpsc::Sender<LocationServiceMessage>,
    location_rx: Mutex<mpsc::Receiver<LocationServiceMessage>>,
}

impl AppServices {
    /// Start the runtime and open (seeding if needed) the database named by
    /// `config`
    pub fn start(config: Config) -> Result<Self, AppError> {
        let runtime = build_runtime()?;
        let path = config.database_path();
        let (dao, outcome) =
            WeatherDao::open(&path, runtime.handle().clone()).map_err(store_error)?;
        tracing::info!("Weather store at {} ({:?})", path.display(), outcome);
        Self::assemble(runtime, config, dao, outcome)
    }

    /// Same as [`AppServices::start`] with a throwaway in-memory database
    pub fn start_in_memory(config: Config) -> Result<Self, AppError> {
        let runtime = build_runtime()?;
        let (dao, outcome) =
            WeatherDao::open_in_memory(runtime.handle().clone()).map_err(store_error)?;
        Self::assemble(runtime, config, dao, outcome)
    }

    fn assemble(
        runtime: Runtime,
        config: Config,
        dao: WeatherDao,
        outcome: OpenOutcome,
    ) -> Result<Self, AppError> {
        let repository = WeatherRepository::new(dao);
        let primary_city_id = resolve_primary_city(&repository, config.session.primary_city_id)?;
        let (location_tx, location_rx) = mpsc::channel();
        Ok(Self {
            runtime,
            config,
            repository,
            open_outcome: outcome,
            primary_city_id,
            location_tx,
            location_rx: Mutex::new(location_rx),
        })
    }

    pub fn runtime(&self) -> Handle {
        self.runtime.handle().clone()
    }

    pub fn repository(&self) -> &WeatherRepository {
        &self.repository
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether the store was created, reopened or rebuilt on start
    pub fn open_outcome(&self) -> OpenOutcome {
        self.open_outcome
    }

    /// Fresh session starting on the primary city
    pub fn new_session(&self) -> SessionState {
        SessionState::new(self.primary_city_id)
    }

    /// Start-up display preferences
    pub fn preferences(&self) -> Preferences {
        Preferences::from(&self.config.ui)
    }

    pub fn language(&self) -> Language {
        core_language(self.config.ui.language)
    }

    pub fn main_view_model(&self, session: SessionState) -> Result<MainViewModel, AppError> {
        Ok(MainViewModel::new(
            self.repository.clone(),
            session,
            self.runtime(),
        )?)
    }

    pub fn locations_view_model(
        &self,
        session: SessionState,
    ) -> Result<LocationsViewModel, AppError> {
        Ok(LocationsViewModel::new(
            &self.repository,
            session,
            self.runtime.handle(),
        )?)
    }

    /// Ask for the device location. The answer arrives through
    /// [`AppServices::poll_location`].
    pub fn request_current_location(&self) {
        request_current_location(&self.location_tx, self.runtime.handle());
    }

    /// Non-blocking check for a location answer
    pub fn poll_location(&self) -> Option<LocationServiceMessage> {
        self.location_rx.lock().try_recv().ok()
    }

    /// Wait up to `timeout` for a location answer
    pub fn recv_location(&self, timeout: Duration) -> Option<LocationServiceMessage> {
        self.location_rx.lock().recv_timeout(timeout).ok()
    }

    /// Stop the runtime.
    ///
    /// Live queries still alive after this stop refreshing.
    pub fn shutdown(self) {
        tracing::info!("AppServices shutdown initiated");
        self.runtime.shutdown_timeout(SHUTDOWN_TIMEOUT);
        tracing::info!("AppServices shutdown complete");
    }
}

/// `configured` if it is a stored city, otherwise the stored city with the
/// lowest id
fn resolve_primary_city(
    repository: &WeatherRepository,
    configured: CityId,
) -> Result<CityId, AppError> {
    if repository.city(configured).map_err(store_error)?.is_some() {
        return Ok(configured);
    }

    let first = repository.cities().map_err(store_error)?.into_iter().next();
    match first {
        Some(city) => {
            tracing::warn!(
                "Configured primary city {} does not exist, starting on {} ({})",
                configured,
                city.id,
                city.name
            );
            Ok(city.id)
        }
        None => Err(ConfigError::Invalid(format!(
            "session.primary_city_id {} does not exist and the store has no cities",
            configured
        ))
        .into()),
    }
}

fn build_runtime() -> Result<Runtime, AppError> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("aeris-tokio")
        .build()?)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    use crate::services::LocationServiceError;

    fn config_in(dir: &std::path::Path) -> Config {
        Config {
            data_dir: dir.join("data"),
            ..Config::default()
        }
    }

    #[test]
    fn test_start_creates_then_reopens_store() {
        let dir = tempfile::tempdir().unwrap();

        let services = AppServices::start(config_in(dir.path())).unwrap();
        assert_eq!(services.open_outcome(), OpenOutcome::Created);
        assert!(dir.path().join("data").join("weather_app.db").exists());
        services.shutdown();

        let services = AppServices::start(config_in(dir.path())).unwrap();
        assert_eq!(services.open_outcome(), OpenOutcome::Opened);
        services.shutdown();
    }

    #[test]
    fn test_defaults_from_config() {
        let mut config = Config::default();
        config.session.primary_city_id = 2;
        config.ui.use_mph = true;
        config.ui.language = aeris_core::Language::English;

        let services = AppServices::start_in_memory(config).unwrap();
        assert_eq!(services.new_session().selected_city(), 2);
        assert!(services.preferences().use_mph);
        assert_eq!(services.language(), Language::English);

        let model = services.main_view_model(services.new_session()).unwrap();
        assert_eq!(model.selected_city().unwrap().name, "Madrid");
        drop(model);
        services.shutdown();
    }

    #[test]
    fn test_current_location_is_available_soon() {
        let services = AppServices::start_in_memory(Config::default()).unwrap();
        services.request_current_location();

        let LocationServiceMessage::Done(result) =
            services.recv_location(Duration::from_secs(2)).unwrap();
        assert_eq!(result.unwrap_err(), LocationServiceError::Unavailable);
        assert!(services.poll_location().is_none());
        services.shutdown();
    }

    #[test]
    fn test_missing_primary_city_falls_back_to_first_city() {
        let mut config = Config::default();
        config.session.primary_city_id = 99;

        let services = AppServices::start_in_memory(config).unwrap();
        let session = services.new_session();
        assert_eq!(session.selected_city(), 1);

        let model = services.main_view_model(session.clone()).unwrap();
        assert_eq!(model.selected_city().unwrap().name, "Ciudad Real");
        let locations = services.locations_view_model(session.clone()).unwrap();
        assert!(locations.hide_city(1).is_err());

        drop(locations);
        drop(model);
        services.shutdown();
    }

    #[test]
    fn test_view_model_for_unknown_city_is_rejected() {
        let services = AppServices::start_in_memory(Config::default()).unwrap();

        let err = services.main_view_model(SessionState::new(99)).unwrap_err();
        assert!(matches!(err, AppError::Rejected(_)));
        assert_eq!(err.user_message(), "Ciudad no encontrada");
        services.shutdown();
    }
}
