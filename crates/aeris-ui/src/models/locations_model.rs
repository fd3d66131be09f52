//! View state for the city-list screen.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio_util::sync::{CancellationToken, DropGuard};

use aeris_store::{LiveQuery, WeatherRepository};
use aeris_weather::{CityId, CityWithConditions};

use crate::models::error::{require_city, ModelError};
use crate::session::{SessionError, SessionState};

/// Visible cities: hidden ids removed, then names matching `search`
/// case-insensitively. An empty search keeps everything.
pub fn filter_cities(
    cities: &[CityWithConditions],
    hidden: &HashSet<CityId>,
    search: &str,
) -> Vec<CityWithConditions> {
    let needle = search.to_lowercase();
    cities
        .iter()
        .filter(|c| !hidden.contains(&c.city.id))
        .filter(|c| needle.is_empty() || c.city.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Everything the filtered list is derived from
#[derive(Clone, Debug)]
struct FilterInputs {
    cities: watch::Receiver<Vec<CityWithConditions>>,
    hidden: watch::Receiver<HashSet<CityId>>,
    search: watch::Receiver<String>,
    output: Arc<watch::Sender<Vec<CityWithConditions>>>,
}

impl FilterInputs {
    /// Recompute under the output's write lock, so whichever caller runs
    /// last publishes a result built from the latest inputs
    fn recompute(&self) {
        self.output.send_if_modified(|current| {
            let fresh = filter_cities(
                &self.cities.borrow(),
                &self.hidden.borrow(),
                &self.search.borrow(),
            );
            if *current == fresh {
                false
            } else {
                *current = fresh;
                true
            }
        });
    }
}

#[derive(Debug)]
pub struct LocationsViewModel {
    session: SessionState,
    cities: LiveQuery<Vec<CityWithConditions>>,
    search_tx: watch::Sender<String>,
    hidden_tx: watch::Sender<HashSet<CityId>>,
    inputs: FilterInputs,
    _refresh: DropGuard,
}

impl LocationsViewModel {
    /// Build the view model. The hidden set starts as the session's.
    ///
    /// Fails with [`ModelError::UnknownCity`] when the session's primary city
    /// is not stored.
    pub fn new(
        repository: &WeatherRepository,
        session: SessionState,
        runtime: &Handle,
    ) -> Result<Self, ModelError> {
        require_city(repository, session.selected_city())?;
        let cities = repository.cities_with_conditions()?;
        let (search_tx, search_rx) = watch::channel(String::new());
        let (hidden_tx, hidden_rx) = watch::channel(session.hidden_cities());
        let (output, _) = watch::channel(Vec::new());

        let inputs = FilterInputs {
            cities: cities.subscribe(),
            hidden: hidden_rx,
            search: search_rx,
            output: Arc::new(output),
        };
        inputs.recompute();

        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let task_inputs = inputs.clone();
        let mut changes = cities.subscribe();
        runtime.spawn(async move {
            loop {
                tokio::select! {
                    _ = task_cancel.cancelled() => break,
                    changed = changes.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        task_inputs.recompute();
                    }
                }
            }
        });

        Ok(Self {
            session,
            cities,
            search_tx,
            hidden_tx,
            inputs,
            _refresh: cancel.drop_guard(),
        })
    }

    /// The city shown first and protected from hiding
    pub fn primary_city_id(&self) -> CityId {
        self.session.selected_city()
    }

    /// Current filtered list
    pub fn filtered_cities(&self) -> Vec<CityWithConditions> {
        self.inputs.output.borrow().clone()
    }

    pub fn watch_filtered_cities(&self) -> watch::Receiver<Vec<CityWithConditions>> {
        self.inputs.output.subscribe()
    }

    /// Every city, hidden or not
    pub fn all_cities(&self) -> Vec<CityWithConditions> {
        self.cities.get()
    }

    /// Hidden cities, for picking one to show again
    pub fn hidden_cities(&self) -> Vec<CityWithConditions> {
        let hidden = self.hidden_tx.borrow();
        self.cities
            .get()
            .into_iter()
            .filter(|c| hidden.contains(&c.city.id))
            .collect()
    }

    pub fn search_text(&self) -> String {
        self.search_tx.borrow().clone()
    }

    pub fn set_search_text(&self, text: &str) {
        self.search_tx.send_replace(text.to_string());
        self.inputs.recompute();
    }

    pub fn set_hidden_ids(&self, hidden: HashSet<CityId>) {
        self.hidden_tx.send_replace(hidden);
        self.inputs.recompute();
    }

    /// Hide a city. Rejected for the primary city, leaving the list as is.
    pub fn hide_city(&self, city_id: CityId) -> Result<(), SessionError> {
        self.hide_cities(&[city_id])
    }

    /// Hide a selection of cities. Rejected as a whole if it contains the
    /// primary city.
    pub fn hide_cities(&self, city_ids: &[CityId]) -> Result<(), SessionError> {
        self.session.hide_cities(city_ids)?;
        self.set_hidden_ids(self.session.hidden_cities());
        Ok(())
    }

    pub fn show_city(&self, city_id: CityId) {
        if self.session.show_city(city_id) {
            self.set_hidden_ids(self.session.hidden_cities());
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    use std::time::Duration;

    use aeris_store::WeatherDao;
    use aeris_weather::City;

    fn entry(id: CityId, name: &str) -> CityWithConditions {
        let mut city = City::new(name, 40.0, -3.0);
        city.id = id;
        CityWithConditions {
            city,
            conditions: None,
        }
    }

    fn sample() -> Vec<CityWithConditions> {
        vec![
            entry(1, "Ciudad Real"),
            entry(2, "Madrid"),
            entry(3, "Barcelona"),
            entry(4, "Valencia"),
        ]
    }

    fn ids(list: &[CityWithConditions]) -> Vec<CityId> {
        list.iter().map(|c| c.city.id).collect()
    }

    #[test]
    fn test_filter_empty_search_keeps_all_visible() {
        let hidden = HashSet::from([3]);
        assert_eq!(ids(&filter_cities(&sample(), &hidden, "")), vec![1, 2, 4]);
    }

    #[test]
    fn test_filter_search_is_case_insensitive() {
        let hidden = HashSet::new();
        assert_eq!(ids(&filter_cities(&sample(), &hidden, "MAD")), vec![2]);
        assert_eq!(ids(&filter_cities(&sample(), &hidden, "real")), vec![1]);
        assert!(filter_cities(&sample(), &hidden, "Lisboa").is_empty());
    }

    #[test]
    fn test_filter_hidden_applies_before_search() {
        let hidden = HashSet::from([4]);
        assert!(filter_cities(&sample(), &hidden, "valen").is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let hidden = HashSet::from([2]);
        let once = filter_cities(&sample(), &hidden, "a");
        let twice = filter_cities(&once, &hidden, "a");
        assert_eq!(once, twice);
    }

    fn repository() -> WeatherRepository {
        let (dao, _) = WeatherDao::open_in_memory(Handle::current()).unwrap();
        WeatherRepository::new(dao)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_search_and_hide_update_filtered_list() {
        let session = SessionState::new(1);
        let model = LocationsViewModel::new(&repository(), session, &Handle::current()).unwrap();
        assert_eq!(model.filtered_cities().len(), 20);

        model.set_search_text("ma");
        let names: Vec<String> = model
            .filtered_cities()
            .into_iter()
            .map(|c| c.city.name)
            .collect();
        assert_eq!(names, vec!["Madrid", "Palma", "Las Palmas"]);

        model.set_search_text("");
        model.hide_city(2).unwrap();
        assert_eq!(model.filtered_cities().len(), 19);
        assert_eq!(ids(&model.hidden_cities()), vec![2]);

        model.show_city(2);
        assert_eq!(model.filtered_cities().len(), 20);
        assert!(model.hidden_cities().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_hiding_primary_leaves_list_unchanged() {
        let session = SessionState::new(1);
        let model =
            LocationsViewModel::new(&repository(), session.clone(), &Handle::current()).unwrap();
        let before = model.filtered_cities();

        assert!(model.hide_cities(&[5, 1]).is_err());
        assert_eq!(model.filtered_cities(), before);
        assert!(session.hidden_cities().is_empty());

        model.hide_cities(&[5, 6]).unwrap();
        assert_eq!(model.filtered_cities().len(), 18);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_primary_city_always_stays_visible() {
        let session = SessionState::new(1);
        let model = LocationsViewModel::new(&repository(), session, &Handle::current()).unwrap();

        let every_city: Vec<CityId> = (1..=20).collect();
        assert!(model.hide_cities(&every_city).is_err());
        assert_eq!(model.filtered_cities().len(), 20);

        model.hide_cities(&every_city[1..]).unwrap();
        assert_eq!(ids(&model.filtered_cities()), vec![1]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_unknown_primary_city_is_rejected() {
        let session = SessionState::new(99);
        let err = LocationsViewModel::new(&repository(), session, &Handle::current()).unwrap_err();
        assert!(matches!(err, ModelError::UnknownCity { city_id: 99 }));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_starts_with_session_hidden_set() {
        let session = SessionState::new(1);
        session.hide_city(7).unwrap();
        let model = LocationsViewModel::new(&repository(), session, &Handle::current()).unwrap();
        assert!(model.filtered_cities().iter().all(|c| c.city.id != 7));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_store_changes_recompute_list() {
        let repo = repository();
        let session = SessionState::new(1);
        let model = LocationsViewModel::new(&repo, session, &Handle::current()).unwrap();
        model.set_search_text("tol");
        assert!(model.filtered_cities().is_empty());

        let mut rx = model.watch_filtered_cities();
        repo.insert_city(City::new("Toledo", 39.8628, -4.0273))
            .await
            .unwrap();
        tokio::time::timeout(Duration::from_secs(2), rx.changed())
            .await
            .unwrap()
            .unwrap();

        let filtered = model.filtered_cities();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].city.name, "Toledo");
        assert!(filtered[0].conditions.is_none());
    }
}
