//! Weather domain for Aeris
//!
//! Record types for cities and their weather, unit conversion, translation of
//! the stored Spanish text, the synthetic seed data and the map viewer link.

pub mod locale;
pub mod location;
pub mod map;
pub mod seed;
pub mod types;
pub mod units;

pub use locale::{Language, Message, UvLevel};
pub use map::map_viewer_url;
pub use seed::{SeedCity, SEED_CITIES};
pub use types::*;
pub use units::{SpeedUnit, TemperatureUnit};
