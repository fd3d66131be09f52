//! Screens and the display preferences carried between them.

use aeris_weather::{SpeedUnit, TemperatureUnit};

/// Display preferences. Passed forward unchanged on every navigation and
/// replaced wholesale by the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub use_fahrenheit: bool,
    pub use_mph: bool,
    pub dark_theme: bool,
}

impl Preferences {
    pub fn temperature_unit(self) -> TemperatureUnit {
        TemperatureUnit::from_fahrenheit_flag(self.use_fahrenheit)
    }

    pub fn speed_unit(self) -> SpeedUnit {
        SpeedUnit::from_mph_flag(self.use_mph)
    }
}

impl From<&aeris_core::UiConfig> for Preferences {
    fn from(ui: &aeris_core::UiConfig) -> Self {
        Self {
            use_fahrenheit: ui.use_fahrenheit,
            use_mph: ui.use_mph,
            dark_theme: ui.dark_theme,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Locations,
    Settings,
    Map,
}

/// Where the user is and with which preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigator {
    screen: Screen,
    preferences: Preferences,
}

impl Navigator {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            screen: Screen::Home,
            preferences,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    /// Move to another screen, keeping the current preferences
    pub fn navigate(&mut self, to: Screen) -> Preferences {
        tracing::debug!("Navigating {:?} -> {:?}", self.screen, to);
        self.screen = to;
        self.preferences
    }

    /// Replace the preferences, as the settings screen does
    pub fn apply(&mut self, preferences: Preferences) {
        self.preferences = preferences;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_keeps_preferences() {
        let prefs = Preferences {
            use_fahrenheit: true,
            use_mph: false,
            dark_theme: true,
        };
        let mut nav = Navigator::new(prefs);
        assert_eq!(nav.screen(), Screen::Home);

        assert_eq!(nav.navigate(Screen::Locations), prefs);
        assert_eq!(nav.navigate(Screen::Map), prefs);
        assert_eq!(nav.screen(), Screen::Map);
        assert_eq!(nav.preferences(), prefs);
    }

    #[test]
    fn test_apply_replaces_preferences() {
        let mut nav = Navigator::default();
        let prefs = Preferences {
            use_mph: true,
            ..Preferences::default()
        };
        nav.apply(prefs);
        assert_eq!(nav.navigate(Screen::Home), prefs);
    }

    #[test]
    fn test_units_from_preferences() {
        let prefs = Preferences {
            use_fahrenheit: true,
            use_mph: true,
            dark_theme: false,
        };
        assert_eq!(prefs.temperature_unit(), TemperatureUnit::Fahrenheit);
        assert_eq!(prefs.speed_unit(), SpeedUnit::Mph);
        assert_eq!(Preferences::default().temperature_unit(), TemperatureUnit::Celsius);
    }
}
