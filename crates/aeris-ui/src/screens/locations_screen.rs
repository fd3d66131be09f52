//! City list screen rows.

use chrono::{Datelike, NaiveDateTime};

use aeris_weather::locale::{self, Message};
use aeris_weather::{CityId, CityWithConditions, Language, WeatherIcon};

use crate::models::LocationsViewModel;
use crate::navigation::Preferences;
use crate::screens::main_screen::NO_TEMPERATURE;

/// What the leading icon of a row shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowIcon {
    /// The primary city
    Home,
    Weather(WeatherIcon),
    /// No conditions stored
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationItem {
    pub city_id: CityId,
    pub name: String,
    pub weekday: String,
    pub description: String,
    /// Only filled for the primary city
    pub min_max: Option<String>,
    pub temperature: String,
    pub icon: RowIcon,
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationsScreen {
    pub items: Vec<LocationItem>,
    pub search_text: String,
}

/// An entry of the "show hidden city" picker
#[derive(Debug, Clone, PartialEq)]
pub struct HiddenCityOption {
    pub city_id: CityId,
    pub name: String,
}

pub fn present_location(
    entry: &CityWithConditions,
    primary_city_id: CityId,
    preferences: Preferences,
    language: Language,
    now: NaiveDateTime,
) -> LocationItem {
    let temp = preferences.temperature_unit();
    let is_primary = entry.city.id == primary_city_id;
    let weekday =
        locale::weekday_name(now.weekday().num_days_from_monday() as usize, language).to_string();

    match &entry.conditions {
        Some(c) => LocationItem {
            city_id: entry.city.id,
            name: entry.city.name.clone(),
            weekday,
            description: locale::translate_description(&c.description, language),
            min_max: is_primary.then(|| {
                format!(
                    "MIN: {} / MAX: {}",
                    temp.format(c.temp_low),
                    temp.format(c.temp_high)
                )
            }),
            temperature: temp.format(c.temperature),
            icon: if is_primary {
                RowIcon::Home
            } else {
                RowIcon::Weather(WeatherIcon::for_display(&c.icon_code))
            },
            is_primary,
        },
        None => LocationItem {
            city_id: entry.city.id,
            name: entry.city.name.clone(),
            weekday,
            description: Message::NoData.text(language).to_string(),
            min_max: is_primary.then(|| format!("MIN: {0} / MAX: {0}", NO_TEMPERATURE)),
            temperature: NO_TEMPERATURE.to_string(),
            icon: if is_primary { RowIcon::Home } else { RowIcon::None },
            is_primary,
        },
    }
}

/// Rows for the given cities, primary city first and the rest in list order
pub fn present_locations(
    cities: &[CityWithConditions],
    primary_city_id: CityId,
    preferences: Preferences,
    language: Language,
    now: NaiveDateTime,
) -> Vec<LocationItem> {
    let mut items: Vec<LocationItem> = cities
        .iter()
        .map(|c| present_location(c, primary_city_id, preferences, language, now))
        .collect();
    // Stable, so the others keep their order
    items.sort_by_key(|item| !item.is_primary);
    items
}

pub fn render_locations(
    model: &LocationsViewModel,
    preferences: Preferences,
    language: Language,
    now: NaiveDateTime,
) -> LocationsScreen {
    LocationsScreen {
        items: present_locations(
            &model.filtered_cities(),
            model.primary_city_id(),
            preferences,
            language,
            now,
        ),
        search_text: model.search_text(),
    }
}

pub fn hidden_city_picker(model: &LocationsViewModel) -> Vec<HiddenCityOption> {
    model
        .hidden_cities()
        .into_iter()
        .map(|c| HiddenCityOption {
            city_id: c.city.id,
            name: c.city.name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    use chrono::NaiveDate;

    use aeris_weather::{City, SEED_CITIES};

    fn wednesday() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 7)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn seeded(index: usize) -> CityWithConditions {
        let id = index as CityId + 1;
        let mut city = SEED_CITIES[index].city();
        city.id = id;
        CityWithConditions {
            city,
            conditions: Some(SEED_CITIES[index].current_conditions(id)),
        }
    }

    #[test]
    fn test_primary_row_has_min_max_and_home_icon() {
        let item = present_location(
            &seeded(1),
            2,
            Preferences::default(),
            Language::English,
            wednesday(),
        );
        assert!(item.is_primary);
        assert_eq!(item.icon, RowIcon::Home);
        assert_eq!(item.min_max.as_deref(), Some("MIN: 15° / MAX: 28°"));
        assert_eq!(item.temperature, "25°");
        assert_eq!(item.weekday, "Wednesday");
        assert_eq!(item.description, "Sunny");
    }

    #[test]
    fn test_other_row_shows_weather_icon() {
        let item = present_location(
            &seeded(10),
            1,
            Preferences::default(),
            Language::Spanish,
            wednesday(),
        );
        assert!(!item.is_primary);
        assert_eq!(item.icon, RowIcon::Weather(WeatherIcon::Rain));
        assert!(item.min_max.is_none());
        assert_eq!(item.description, "Lluvioso");
        assert_eq!(item.weekday, "Miércoles");
    }

    #[test]
    fn test_row_without_conditions() {
        let mut city = City::new("Toledo", 39.8628, -4.0273);
        city.id = 21;
        let entry = CityWithConditions {
            city,
            conditions: None,
        };
        let item = present_location(
            &entry,
            1,
            Preferences::default(),
            Language::English,
            wednesday(),
        );
        assert_eq!(item.temperature, "--°");
        assert_eq!(item.description, "No data");
        assert_eq!(item.icon, RowIcon::None);
        assert!(item.min_max.is_none());

        let primary = present_location(
            &entry,
            21,
            Preferences::default(),
            Language::Spanish,
            wednesday(),
        );
        assert_eq!(primary.icon, RowIcon::Home);
        assert_eq!(primary.min_max.as_deref(), Some("MIN: --° / MAX: --°"));
        assert_eq!(primary.description, "Sin datos");
    }

    #[test]
    fn test_primary_sorted_first() {
        let cities = vec![seeded(0), seeded(1), seeded(2), seeded(3)];
        let items = present_locations(
            &cities,
            3,
            Preferences {
                use_fahrenheit: true,
                ..Preferences::default()
            },
            Language::English,
            wednesday(),
        );
        let ids: Vec<CityId> = items.iter().map(|i| i.city_id).collect();
        assert_eq!(ids, vec![3, 1, 2, 4]);
        // Barcelona 22°C
        assert_eq!(items[0].temperature, "71°");
    }
}
