use serde::{Deserialize, Serialize};

/// Store-assigned city identifier
pub type CityId = i64;

/// Weather icon categories, stored by their resource code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    #[default]
    Sun,
    PartlyCloudy,
    Cloudy,
    Rain,
    Snow,
    Storm,
}

impl WeatherIcon {
    /// Code persisted in the `icon_code` columns
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sun => "ic_sol",
            Self::PartlyCloudy => "ic_parcialmente_nublado",
            Self::Cloudy => "ic_nublado",
            Self::Rain => "ic_lluvia",
            Self::Snow => "ic_nieve",
            Self::Storm => "ic_tormenta",
        }
    }

    /// Parse a stored code, `None` for codes this build doesn't know
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ic_sol" => Some(Self::Sun),
            "ic_parcialmente_nublado" => Some(Self::PartlyCloudy),
            "ic_nublado" => Some(Self::Cloudy),
            "ic_lluvia" => Some(Self::Rain),
            "ic_nieve" => Some(Self::Snow),
            "ic_tormenta" => Some(Self::Storm),
            _ => None,
        }
    }

    /// Icon to render for a stored code. Unknown codes render as the sun.
    pub fn for_display(code: &str) -> Self {
        Self::from_code(code).unwrap_or_default()
    }
}

/// A seeded location.
///
/// `id` is 0 until the store assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl City {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

/// Present-moment weather for one city. Temperatures in °C, wind in km/h.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub id: i64,
    pub city_id: CityId,
    pub temperature: f64,
    /// Stored in Spanish, see [`crate::locale::translate_description`]
    pub description: String,
    pub icon_code: String,
    pub temp_high: f64,
    pub temp_low: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub uv_index: f64,
    pub precipitation: i32,
}

/// One hour of the synthetic 24-hour forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub id: i64,
    pub city_id: CityId,
    /// "HH:00"
    pub hour: String,
    pub temperature: f64,
    pub icon_code: String,
}

/// One day of the synthetic 7-day forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub id: i64,
    pub city_id: CityId,
    /// Spanish weekday name, "Lunes".."Domingo"
    pub day_name: String,
    pub temp_high: f64,
    pub temp_low: f64,
    pub icon_code: String,
}

/// A city with its current conditions, if any (left join)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityWithConditions {
    pub city: City,
    pub conditions: Option<CurrentConditions>,
}

/// Geographic location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: Option<f64>,
    pub city_name: Option<String>,
}

impl From<&City> for Location {
    fn from(city: &City) -> Self {
        Self {
            latitude: city.latitude,
            longitude: city.longitude,
            accuracy_meters: None,
            city_name: Some(city.name.clone()),
        }
    }
}

/// Location service errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Invalid coordinates: {latitude}, {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
    #[error("Location error: {0}")]
    Other(String),
}
