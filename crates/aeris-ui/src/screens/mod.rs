//! Presenters: turn view-model state into the text and icons each screen shows.

pub mod locations_screen;
pub mod main_screen;
pub mod map_screen;
pub mod settings_screen;

pub use locations_screen::{render_locations, LocationItem, LocationsScreen, RowIcon};
pub use main_screen::{render_home, ConditionsView, DailyItem, HomeScreen, HourlyItem};
pub use map_screen::{present_map, MapView};
pub use settings_screen::{render_settings, Setting, SettingRow};
