//! Local weather storage for Aeris.
//!
//! A SQLite database holding cities and their synthetic weather, seeded on
//! first creation. Queries come in two forms: plain snapshots and
//! [`LiveQuery`] handles that refresh whenever the tables they read change.

pub mod dao;
pub mod error;
pub mod live;
pub mod repository;
pub mod schema;
mod tables;

pub use dao::WeatherDao;
pub use error::{Error, Result};
pub use live::{LiveQuery, Table};
pub use repository::WeatherRepository;
pub use schema::{OpenOutcome, SCHEMA_VERSION};
