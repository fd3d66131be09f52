pub mod error;
pub mod locations_model;
pub mod main_model;

pub use error::ModelError;
pub use locations_model::{filter_cities, LocationsViewModel};
pub use main_model::MainViewModel;
