//! Screens and view state for Aeris.
//!
//! View models hold the observable state of the home and city-list screens;
//! the `screens` presenters turn it into what is displayed. `AppServices`
//! wires the runtime, store and services together.

pub mod app_services;
pub mod error_mapping;
pub mod models;
pub mod navigation;
pub mod screens;
pub mod services;
pub mod session;

pub use app_services::AppServices;
pub use models::{LocationsViewModel, MainViewModel};
pub use navigation::{Navigator, Preferences, Screen};
pub use session::{SessionError, SessionState};
