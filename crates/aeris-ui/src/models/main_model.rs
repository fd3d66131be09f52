//! View state for the home screen.
//!
//! Follows the selected city: changing the selection drops the live queries
//! of the previous city and starts new ones (switch-latest). A generation
//! counter rejects any value a previous city's forwarder tries to publish
//! after the switch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio_util::sync::{CancellationToken, DropGuard};

use aeris_store::{LiveQuery, WeatherRepository};
use aeris_weather::{City, CityId, CurrentConditions, DailyForecast, HourlyForecast};

use crate::models::error::{require_city, ModelError};
use crate::session::SessionState;

/// Publish `value` unless the selection has moved past `expected`
fn publish<T: PartialEq>(
    target: &watch::Sender<T>,
    generation: &AtomicU64,
    expected: u64,
    value: T,
) -> bool {
    target.send_if_modified(|current| {
        if generation.load(Ordering::Acquire) != expected || *current == value {
            return false;
        }
        *current = value;
        true
    })
}

/// Copy every change of `source` into `target` until cancelled or the
/// source closes
fn forward<T>(
    runtime: &Handle,
    cancel: CancellationToken,
    mut source: watch::Receiver<T>,
    target: Arc<watch::Sender<T>>,
    generation: Arc<AtomicU64>,
    expected: u64,
) where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    runtime.spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                changed = source.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let value = source.borrow_and_update().clone();
                    if !publish(&target, &generation, expected, value) {
                        tracing::trace!("Dropped update for selection generation {}", expected);
                    }
                }
            }
        }
    });
}

/// Live queries for one selected city. Dropping it stops all of them.
#[derive(Debug)]
struct Selection {
    _conditions: LiveQuery<Option<CurrentConditions>>,
    _hourly: LiveQuery<Vec<HourlyForecast>>,
    _daily: LiveQuery<Vec<DailyForecast>>,
    _forwarders: DropGuard,
}

#[derive(Debug)]
pub struct MainViewModel {
    repository: WeatherRepository,
    session: SessionState,
    runtime: Handle,
    cities: LiveQuery<Vec<City>>,
    selected_tx: watch::Sender<CityId>,
    conditions_tx: Arc<watch::Sender<Option<CurrentConditions>>>,
    hourly_tx: Arc<watch::Sender<Vec<HourlyForecast>>>,
    daily_tx: Arc<watch::Sender<Vec<DailyForecast>>>,
    generation: Arc<AtomicU64>,
    selection: Option<Selection>,
}

impl MainViewModel {
    /// Build the view model and load the session's selected city.
    ///
    /// Fails with [`ModelError::UnknownCity`] when the session's city is not
    /// stored.
    pub fn new(
        repository: WeatherRepository,
        session: SessionState,
        runtime: Handle,
    ) -> Result<Self, ModelError> {
        let cities = repository.all_cities()?;
        let selected = session.selected_city();

        let mut model = Self {
            repository,
            session,
            runtime,
            cities,
            selected_tx: watch::channel(selected).0,
            conditions_tx: Arc::new(watch::channel(None).0),
            hourly_tx: Arc::new(watch::channel(Vec::new()).0),
            daily_tx: Arc::new(watch::channel(Vec::new()).0),
            generation: Arc::new(AtomicU64::new(0)),
            selection: None,
        };
        model.change_selected_city(selected)?;
        Ok(model)
    }

    /// Switch every derived value to `city_id`.
    ///
    /// When this returns the outputs hold the new city's data and nothing
    /// from the previous city can overwrite it. An id that is not a stored
    /// city is rejected and the current selection stays.
    pub fn change_selected_city(&mut self, city_id: CityId) -> Result<(), ModelError> {
        require_city(&self.repository, city_id)?;

        let conditions = self.repository.current_conditions(city_id)?;
        let hourly = self.repository.hourly_forecast(city_id)?;
        let daily = self.repository.daily_forecast(city_id)?;

        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        // Stops the previous city's refreshes and forwarders
        self.selection = None;

        self.session.select_city(city_id);
        self.selected_tx.send_replace(city_id);

        let mut initial_conditions = conditions.subscribe();
        let mut initial_hourly = hourly.subscribe();
        let mut initial_daily = daily.subscribe();

        let value = initial_conditions.borrow_and_update().clone();
        publish(&self.conditions_tx, &self.generation, generation, value);
        let value = initial_hourly.borrow_and_update().clone();
        publish(&self.hourly_tx, &self.generation, generation, value);
        let value = initial_daily.borrow_and_update().clone();
        publish(&self.daily_tx, &self.generation, generation, value);

        let cancel = CancellationToken::new();
        forward(
            &self.runtime,
            cancel.clone(),
            initial_conditions,
            Arc::clone(&self.conditions_tx),
            Arc::clone(&self.generation),
            generation,
        );
        forward(
            &self.runtime,
            cancel.clone(),
            initial_hourly,
            Arc::clone(&self.hourly_tx),
            Arc::clone(&self.generation),
            generation,
        );
        forward(
            &self.runtime,
            cancel.clone(),
            initial_daily,
            Arc::clone(&self.daily_tx),
            Arc::clone(&self.generation),
            generation,
        );

        self.selection = Some(Selection {
            _conditions: conditions,
            _hourly: hourly,
            _daily: daily,
            _forwarders: cancel.drop_guard(),
        });

        tracing::debug!("Selected city {} (generation {})", city_id, generation);
        Ok(())
    }

    pub fn selected_city_id(&self) -> CityId {
        *self.selected_tx.borrow()
    }

    /// The selected city's record, if it exists
    pub fn selected_city(&self) -> Option<City> {
        let id = self.selected_city_id();
        self.cities.get().into_iter().find(|c| c.id == id)
    }

    /// Every city, for the city picker
    pub fn cities(&self) -> Vec<City> {
        self.cities.get()
    }

    pub fn watch_selected_city(&self) -> watch::Receiver<CityId> {
        self.selected_tx.subscribe()
    }

    pub fn current_conditions(&self) -> Option<CurrentConditions> {
        self.conditions_tx.borrow().clone()
    }

    pub fn watch_current_conditions(&self) -> watch::Receiver<Option<CurrentConditions>> {
        self.conditions_tx.subscribe()
    }

    pub fn hourly_forecast(&self) -> Vec<HourlyForecast> {
        self.hourly_tx.borrow().clone()
    }

    pub fn watch_hourly_forecast(&self) -> watch::Receiver<Vec<HourlyForecast>> {
        self.hourly_tx.subscribe()
    }

    pub fn daily_forecast(&self) -> Vec<DailyForecast> {
        self.daily_tx.borrow().clone()
    }

    pub fn watch_daily_forecast(&self) -> watch::Receiver<Vec<DailyForecast>> {
        self.daily_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    use std::time::Duration;

    use aeris_store::WeatherDao;

    fn repository() -> WeatherRepository {
        let (dao, _) = WeatherDao::open_in_memory(Handle::current()).unwrap();
        WeatherRepository::new(dao)
    }

    #[test]
    fn test_publish_respects_generation() {
        let (tx, _rx) = watch::channel(0);
        let generation = AtomicU64::new(2);

        assert!(!publish(&tx, &generation, 1, 10));
        assert_eq!(*tx.borrow(), 0);
        assert!(publish(&tx, &generation, 2, 10));
        assert_eq!(*tx.borrow(), 10);
        // Same value is not a change
        assert!(!publish(&tx, &generation, 2, 10));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_initial_selection_loaded() {
        let session = SessionState::new(1);
        let model = MainViewModel::new(repository(), session, Handle::current()).unwrap();

        assert_eq!(model.selected_city_id(), 1);
        assert_eq!(model.selected_city().unwrap().name, "Ciudad Real");
        assert_eq!(model.current_conditions().unwrap().city_id, 1);
        assert_eq!(model.hourly_forecast().len(), 24);
        assert_eq!(model.daily_forecast().len(), 7);
        assert_eq!(model.cities().len(), 20);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_switch_replaces_all_outputs() {
        let session = SessionState::new(1);
        let mut model =
            MainViewModel::new(repository(), session.clone(), Handle::current()).unwrap();
        let mut conditions = model.watch_current_conditions();
        let _ = conditions.borrow_and_update();

        model.change_selected_city(2).unwrap();

        assert!(conditions.has_changed().unwrap());
        assert_eq!(conditions.borrow_and_update().as_ref().unwrap().city_id, 2);
        assert!(model.hourly_forecast().iter().all(|h| h.city_id == 2));
        assert!(model.daily_forecast().iter().all(|d| d.city_id == 2));
        assert_eq!(session.selected_city(), 2);
        assert_eq!(*model.watch_selected_city().borrow(), 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_old_city_writes_do_not_leak_after_switch() {
        let repo = repository();
        let session = SessionState::new(1);
        let mut model = MainViewModel::new(repo.clone(), session, Handle::current()).unwrap();
        model.change_selected_city(3).unwrap();

        // Rewrite the previous city's conditions after the switch
        let mut stale = model.current_conditions().unwrap();
        stale.id = 0;
        stale.city_id = 1;
        stale.temperature = -20.0;
        repo.insert_current_conditions(stale).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        let shown = model.current_conditions().unwrap();
        assert_eq!(shown.city_id, 3);
        assert_ne!(shown.temperature, -20.0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_selected_city_writes_are_forwarded() {
        let repo = repository();
        let session = SessionState::new(4);
        let model = MainViewModel::new(repo.clone(), session, Handle::current()).unwrap();
        let mut rx = model.watch_current_conditions();
        let _ = rx.borrow_and_update();

        let mut updated = model.current_conditions().unwrap();
        updated.temperature = 40.0;
        repo.insert_current_conditions(updated).await.unwrap();

        tokio::time::timeout(Duration::from_secs(2), rx.changed())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rx.borrow().as_ref().unwrap().temperature, 40.0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_unknown_city_rejected_without_change() {
        let session = SessionState::new(1);
        let mut model =
            MainViewModel::new(repository(), session.clone(), Handle::current()).unwrap();
        let mut selected = model.watch_selected_city();
        let _ = selected.borrow_and_update();

        let err = model.change_selected_city(404).unwrap_err();
        assert!(matches!(err, ModelError::UnknownCity { city_id: 404 }));

        assert_eq!(model.selected_city_id(), 1);
        assert_eq!(session.selected_city(), 1);
        assert!(!selected.has_changed().unwrap());
        assert_eq!(model.current_conditions().unwrap().city_id, 1);
        assert_eq!(model.hourly_forecast().len(), 24);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_session_on_unknown_city_is_rejected() {
        let session = SessionState::new(99);
        let err = MainViewModel::new(repository(), session, Handle::current()).unwrap_err();
        assert!(matches!(err, ModelError::UnknownCity { city_id: 99 }));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_deleted_city_cannot_be_selected() {
        let repo = repository();
        let mut model =
            MainViewModel::new(repo.clone(), SessionState::new(1), Handle::current()).unwrap();
        repo.delete_city(5).await.unwrap();

        assert!(model.change_selected_city(5).is_err());
        assert_eq!(model.selected_city_id(), 1);
    }
}
