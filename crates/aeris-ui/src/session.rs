//! Per-run session state: the selected (primary) city and the hidden cities.
//!
//! Nothing here is persisted. `SessionState` is `!Send`, so it can only be
//! used from the thread that owns the UI.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use aeris_weather::locale::Message;
use aeris_weather::{CityId, Language};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("City {city_id} is the primary city and cannot be hidden")]
    PrimaryCityHidden { city_id: CityId },
}

impl SessionError {
    pub fn user_message(&self, language: Language) -> &'static str {
        match self {
            SessionError::PrimaryCityHidden { .. } => {
                Message::PrimaryCityCannotBeRemoved.text(language)
            }
        }
    }
}

#[derive(Debug)]
struct Session {
    selected: Cell<CityId>,
    hidden: RefCell<HashSet<CityId>>,
}

/// Shared handle to the session. Clones see the same state.
#[derive(Debug, Clone)]
pub struct SessionState {
    inner: Rc<Session>,
}

impl SessionState {
    pub fn new(primary_city_id: CityId) -> Self {
        Self {
            inner: Rc::new(Session {
                selected: Cell::new(primary_city_id),
                hidden: RefCell::new(HashSet::new()),
            }),
        }
    }

    /// The selected city, which is also the primary city of the list screen
    pub fn selected_city(&self) -> CityId {
        self.inner.selected.get()
    }

    /// Select a city. A hidden city becomes visible again when selected.
    pub fn select_city(&self, city_id: CityId) {
        self.inner.selected.set(city_id);
        if self.inner.hidden.borrow_mut().remove(&city_id) {
            tracing::debug!("City {} unhidden on selection", city_id);
        }
    }

    pub fn is_hidden(&self, city_id: CityId) -> bool {
        self.inner.hidden.borrow().contains(&city_id)
    }

    pub fn hidden_cities(&self) -> HashSet<CityId> {
        self.inner.hidden.borrow().clone()
    }

    /// Hide one city. The primary city is never hidden.
    pub fn hide_city(&self, city_id: CityId) -> Result<(), SessionError> {
        self.hide_cities(&[city_id])
    }

    /// Hide several cities at once. If the primary city is among them nothing
    /// is hidden.
    pub fn hide_cities(&self, city_ids: &[CityId]) -> Result<(), SessionError> {
        let primary = self.selected_city();
        if city_ids.contains(&primary) {
            tracing::debug!("Rejected hiding primary city {}", primary);
            return Err(SessionError::PrimaryCityHidden { city_id: primary });
        }

        self.inner.hidden.borrow_mut().extend(city_ids.iter().copied());
        Ok(())
    }

    /// Make a hidden city visible again. Returns whether it was hidden.
    pub fn show_city(&self, city_id: CityId) -> bool {
        self.inner.hidden.borrow_mut().remove(&city_id)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_default_selection() {
        let session = SessionState::new(1);
        assert_eq!(session.selected_city(), 1);
        assert!(session.hidden_cities().is_empty());
    }

    #[test]
    fn test_hide_primary_rejected_without_change() {
        let session = SessionState::new(1);
        let err = session.hide_city(1).unwrap_err();
        assert_eq!(err, SessionError::PrimaryCityHidden { city_id: 1 });
        assert!(session.hidden_cities().is_empty());
        assert_eq!(
            err.user_message(Language::English),
            "You can't remove the primary city"
        );
        assert_eq!(
            err.user_message(Language::Spanish),
            "No puedes eliminar la ciudad principal"
        );
    }

    #[test]
    fn test_hide_and_show_round_trip() {
        let session = SessionState::new(1);
        session.hide_city(4).unwrap();
        assert!(session.is_hidden(4));
        assert!(session.show_city(4));
        assert!(!session.is_hidden(4));
        assert!(!session.show_city(4));
    }

    #[test]
    fn test_batch_with_primary_hides_nothing() {
        let session = SessionState::new(2);
        assert!(session.hide_cities(&[3, 2, 5]).is_err());
        assert!(session.hidden_cities().is_empty());

        session.hide_cities(&[3, 5]).unwrap();
        assert_eq!(session.hidden_cities(), HashSet::from([3, 5]));
    }

    #[test]
    fn test_clones_share_state() {
        let session = SessionState::new(1);
        let other = session.clone();
        other.select_city(7);
        other.hide_city(3).unwrap();
        assert_eq!(session.selected_city(), 7);
        assert!(session.is_hidden(3));
    }

    #[test]
    fn test_selecting_hidden_city_unhides_it() {
        let session = SessionState::new(1);
        session.hide_city(6).unwrap();
        session.select_city(6);
        assert!(!session.is_hidden(6));
        // 1 is no longer primary
        session.hide_city(1).unwrap();
        assert!(session.is_hidden(1));
    }
}
