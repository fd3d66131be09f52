//! Settings screen. Every change yields a new `Preferences`; nothing is
//! written back to the config file.

use aeris_weather::Language;

use crate::navigation::Preferences;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    TemperatureUnit,
    WindUnit,
    Theme,
}

impl Setting {
    pub const ALL: [Setting; 3] = [Setting::TemperatureUnit, Setting::WindUnit, Setting::Theme];

    fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (Setting::TemperatureUnit, Language::Spanish) => "Temperatura en Fahrenheit",
            (Setting::TemperatureUnit, Language::English) => "Temperature in Fahrenheit",
            (Setting::WindUnit, Language::Spanish) => "Viento en mph",
            (Setting::WindUnit, Language::English) => "Wind speed in mph",
            (Setting::Theme, Language::Spanish) => "Tema oscuro",
            (Setting::Theme, Language::English) => "Dark theme",
        }
    }

    fn is_on(self, preferences: Preferences) -> bool {
        match self {
            Setting::TemperatureUnit => preferences.use_fahrenheit,
            Setting::WindUnit => preferences.use_mph,
            Setting::Theme => preferences.dark_theme,
        }
    }

    /// `preferences` with this setting switched to `on`
    #[must_use]
    pub fn set(self, preferences: Preferences, on: bool) -> Preferences {
        match self {
            Setting::TemperatureUnit => Preferences {
                use_fahrenheit: on,
                ..preferences
            },
            Setting::WindUnit => Preferences {
                use_mph: on,
                ..preferences
            },
            Setting::Theme => Preferences {
                dark_theme: on,
                ..preferences
            },
        }
    }

    #[must_use]
    pub fn toggle(self, preferences: Preferences) -> Preferences {
        self.set(preferences, !self.is_on(preferences))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRow {
    pub setting: Setting,
    pub label: &'static str,
    pub enabled: bool,
}

pub fn render_settings(preferences: Preferences, language: Language) -> Vec<SettingRow> {
    Setting::ALL
        .iter()
        .map(|&setting| SettingRow {
            setting,
            label: setting.label(language),
            enabled: setting.is_on(preferences),
        })
        .collect()
}
