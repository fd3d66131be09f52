//! Home screen: current conditions, hourly strip and 7-day list.

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};

use aeris_weather::locale::{self, Message};
use aeris_weather::{
    units, CurrentConditions, DailyForecast, HourlyForecast, Language, UvLevel, WeatherIcon,
};

use crate::models::MainViewModel;
use crate::navigation::Preferences;

/// Shown where a temperature is missing
pub const NO_TEMPERATURE: &str = "--°";

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionsView {
    pub city_name: String,
    pub temperature: String,
    pub description: String,
    pub min: String,
    pub max: String,
    pub date_line: String,
    pub humidity: String,
    pub wind: String,
    pub uv: String,
    pub precipitation: String,
    pub icon: WeatherIcon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyItem {
    pub hour: String,
    pub temperature: String,
    pub icon: WeatherIcon,
    /// Highlighted in the strip
    pub is_current_hour: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyItem {
    /// Stored day name, translated
    pub day: String,
    /// Weekday `position + 2` days from today
    pub secondary_day: String,
    /// "low° / high°"
    pub temperatures: String,
    pub icon: WeatherIcon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeScreen {
    pub conditions: ConditionsView,
    pub hourly: Vec<HourlyItem>,
    pub daily: Vec<DailyItem>,
}

/// One entry of the city picker dialog
#[derive(Debug, Clone, PartialEq)]
pub struct CityOption {
    pub city_id: i64,
    pub name: String,
    pub selected: bool,
}

/// "Monday, Jan 05, 14:30"
pub fn date_line(now: NaiveDateTime, language: Language) -> String {
    format!(
        "{}, {} {:02}, {:02}:{:02}",
        locale::weekday_name(now.weekday().num_days_from_monday() as usize, language),
        locale::month_abbreviation(now.month0() as usize, language),
        now.day(),
        now.hour(),
        now.minute()
    )
}

pub fn present_conditions(
    city_name: &str,
    conditions: Option<&CurrentConditions>,
    preferences: Preferences,
    language: Language,
    now: NaiveDateTime,
) -> ConditionsView {
    let temp = preferences.temperature_unit();
    let date_line = date_line(now, language);

    let Some(c) = conditions else {
        return ConditionsView {
            city_name: city_name.to_string(),
            temperature: NO_TEMPERATURE.to_string(),
            description: Message::NoData.text(language).to_string(),
            min: format!("MIN: {}", NO_TEMPERATURE),
            max: format!("MAX: {}", NO_TEMPERATURE),
            date_line,
            humidity: "--%".to_string(),
            wind: format!("-- {}", preferences.speed_unit().label()),
            uv: "--".to_string(),
            precipitation: "--%".to_string(),
            icon: WeatherIcon::default(),
        };
    };

    let uv_index = units::display_value(c.uv_index);
    ConditionsView {
        city_name: city_name.to_string(),
        temperature: temp.format(c.temperature),
        description: locale::translate_description(&c.description, language),
        min: format!("MIN: {}", temp.format(c.temp_low)),
        max: format!("MAX: {}", temp.format(c.temp_high)),
        date_line,
        humidity: format!("{}%", units::display_value(c.humidity)),
        wind: preferences.speed_unit().format(c.wind_speed),
        uv: format!(
            "{} ({})",
            uv_index,
            UvLevel::from_index(uv_index).label(language)
        ),
        precipitation: format!("{}%", c.precipitation),
        icon: WeatherIcon::for_display(&c.icon_code),
    }
}

/// Whether a stored hour label ("14:00", or a bare "14") is the current hour
fn is_current_hour(label: &str, now: NaiveDateTime) -> bool {
    let hour = format!("{:02}", now.hour());
    label == hour || label == format!("{}:00", hour)
}

pub fn present_hourly(
    rows: &[HourlyForecast],
    preferences: Preferences,
    now: NaiveDateTime,
) -> Vec<HourlyItem> {
    let temp = preferences.temperature_unit();
    rows.iter()
        .map(|row| HourlyItem {
            hour: row.hour.clone(),
            temperature: temp.format(row.temperature),
            icon: WeatherIcon::for_display(&row.icon_code),
            is_current_hour: is_current_hour(&row.hour, now),
        })
        .collect()
}

pub fn present_daily(
    rows: &[DailyForecast],
    preferences: Preferences,
    language: Language,
    now: NaiveDateTime,
) -> Vec<DailyItem> {
    let temp = preferences.temperature_unit();
    rows.iter()
        .enumerate()
        .map(|(position, row)| {
            let secondary = now.date() + Duration::days(position as i64 + 2);
            DailyItem {
                day: locale::translate_day(&row.day_name, language),
                secondary_day: locale::weekday_name(
                    secondary.weekday().num_days_from_monday() as usize,
                    language,
                )
                .to_string(),
                temperatures: format!(
                    "{} / {}",
                    temp.format(row.temp_low),
                    temp.format(row.temp_high)
                ),
                icon: WeatherIcon::for_display(&row.icon_code),
            }
        })
        .collect()
}

/// Everything the home screen shows for the model's current state
pub fn render_home(
    model: &MainViewModel,
    preferences: Preferences,
    language: Language,
    now: NaiveDateTime,
) -> HomeScreen {
    let city_name = model
        .selected_city()
        .map(|c| c.name)
        .unwrap_or_default();
    let conditions = model.current_conditions();

    HomeScreen {
        conditions: present_conditions(
            &city_name,
            conditions.as_ref(),
            preferences,
            language,
            now,
        ),
        hourly: present_hourly(&model.hourly_forecast(), preferences, now),
        daily: present_daily(&model.daily_forecast(), preferences, language, now),
    }
}

/// Entries for the city picker, the selected city marked
pub fn city_picker(model: &MainViewModel) -> Vec<CityOption> {
    let selected = model.selected_city_id();
    model
        .cities()
        .into_iter()
        .map(|c| CityOption {
            city_id: c.id,
            selected: c.id == selected,
            name: c.name,
        })
        .collect()
}
