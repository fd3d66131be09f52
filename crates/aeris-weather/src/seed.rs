//! Synthetic weather for the fixed city list.
//!
//! Everything here is deterministic: the same city always produces the same
//! conditions, 24 hourly rows and 7 daily rows.

use std::f64::consts::PI;

use crate::types::{City, CityId, CurrentConditions, DailyForecast, HourlyForecast, WeatherIcon};

/// Amplitude of the daily temperature swing, °C
const HOURLY_AMPLITUDE: f64 = 5.0;

const DAY_NAMES: [&str; 7] = [
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
    "Domingo",
];

/// Daily icons, by day index. Independent of the city's own icon.
const DAILY_ICONS: [WeatherIcon; 7] = [
    WeatherIcon::Sun,
    WeatherIcon::PartlyCloudy,
    WeatherIcon::Cloudy,
    WeatherIcon::Sun,
    WeatherIcon::PartlyCloudy,
    WeatherIcon::Sun,
    WeatherIcon::Rain,
];

/// Base values for one seeded city
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedCity {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: f64,
    pub description: &'static str,
    pub icon: WeatherIcon,
    pub temp_high: f64,
    pub temp_low: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub uv_index: f64,
    pub precipitation: i32,
}

macro_rules! seed_city {
    ($name:expr, $lat:expr, $lon:expr, $temp:expr, $desc:expr, $icon:ident,
     $high:expr, $low:expr, $hum:expr, $wind:expr, $uv:expr, $precip:expr) => {
        SeedCity {
            name: $name,
            latitude: $lat,
            longitude: $lon,
            temperature: $temp,
            description: $desc,
            icon: WeatherIcon::$icon,
            temp_high: $high,
            temp_low: $low,
            humidity: $hum,
            wind_speed: $wind,
            uv_index: $uv,
            precipitation: $precip,
        }
    };
}

/// Seeded in this order, so the first city gets id 1
pub const SEED_CITIES: [SeedCity; 20] = [
    seed_city!("Ciudad Real", 38.9863, -3.9271, 28.0, "Soleado", Sun, 30.0, 14.0, 25.0, 5.0, 8.0, 5),
    seed_city!("Madrid", 40.4167, -3.7038, 25.0, "Soleado", Sun, 28.0, 15.0, 30.0, 10.0, 7.0, 10),
    seed_city!("Barcelona", 41.3888, 2.159, 22.0, "Parcialmente nublado", PartlyCloudy, 24.0, 18.0, 60.0, 15.0, 5.0, 10),
    seed_city!("Valencia", 39.4699, -0.3763, 26.0, "Nublado", Cloudy, 29.0, 20.0, 55.0, 12.0, 6.0, 10),
    seed_city!("Sevilla", 37.3891, -5.9845, 31.0, "Soleado", Sun, 34.0, 19.0, 20.0, 8.0, 9.0, 10),
    seed_city!("Zaragoza", 41.6488, -0.8891, 24.0, "Parcialmente nublado", PartlyCloudy, 27.0, 14.0, 35.0, 25.0, 7.0, 10),
    seed_city!("Málaga", 36.7213, -4.4214, 27.0, "Soleado", Sun, 29.0, 21.0, 50.0, 10.0, 8.0, 10),
    seed_city!("Murcia", 37.9922, -1.1307, 29.0, "Soleado", Sun, 32.0, 18.0, 30.0, 7.0, 9.0, 10),
    seed_city!("Palma", 39.5696, 2.6502, 25.0, "Parcialmente nublado", PartlyCloudy, 27.0, 20.0, 65.0, 14.0, 6.0, 10),
    seed_city!("Las Palmas", 28.1248, -15.43, 23.0, "Parcialmente nublado", PartlyCloudy, 25.0, 19.0, 70.0, 18.0, 7.0, 10),
    seed_city!("Bilbao", 43.2630, -2.9350, 18.0, "Lluvioso", Rain, 20.0, 14.0, 80.0, 10.0, 3.0, 10),
    seed_city!("Alicante", 38.3452, -0.4810, 26.0, "Soleado", Sun, 28.0, 20.0, 58.0, 11.0, 7.0, 10),
    seed_city!("Córdoba", 37.8882, -4.7794, 30.0, "Soleado", Sun, 33.0, 18.0, 22.0, 9.0, 9.0, 10),
    seed_city!("Valladolid", 41.6521, -4.7286, 23.0, "Parcialmente nublado", PartlyCloudy, 26.0, 12.0, 40.0, 13.0, 6.0, 10),
    seed_city!("Vigo", 42.2406, -8.7207, 19.0, "Nublado", Cloudy, 21.0, 15.0, 75.0, 10.0, 4.0, 10),
    seed_city!("Granada", 37.1773, -3.5986, 28.0, "Soleado", Sun, 31.0, 16.0, 28.0, 6.0, 8.0, 10),
    seed_city!("Vitoria-Gasteiz", 42.8467, -2.6731, 20.0, "Parcialmente nublado", PartlyCloudy, 23.0, 11.0, 60.0, 12.0, 5.0, 10),
    seed_city!("Gijón", 43.5322, -5.6611, 17.0, "Lluvioso", Rain, 19.0, 14.0, 82.0, 15.0, 3.0, 10),
    seed_city!("Santander", 43.4623, -3.8099, 18.0, "Nublado", Cloudy, 20.0, 15.0, 78.0, 12.0, 4.0, 10),
    seed_city!("Pamplona", 42.8125, -1.6458, 21.0, "Soleado", Sun, 24.0, 13.0, 45.0, 11.0, 6.0, 10),
];

/// Temperature at hour `h` for a base temperature.
///
/// Zero crossing at 06:00, peak at 12:00.
pub fn hourly_temperature(base: f64, hour: u32) -> f64 {
    base + ((f64::from(hour) - 6.0) * PI / 12.0).sin() * HOURLY_AMPLITUDE
}

/// (high, low) for day index `i`, centred on Thursday
pub fn daily_temperatures(base_high: f64, base_low: f64, day_index: usize) -> (f64, f64) {
    let offset = day_index as f64 - 3.0;
    (base_high + offset * 0.5, base_low + offset * 0.3)
}

impl SeedCity {
    /// Unassigned city row
    pub fn city(&self) -> City {
        City::new(self.name, self.latitude, self.longitude)
    }

    pub fn current_conditions(&self, city_id: CityId) -> CurrentConditions {
        CurrentConditions {
            id: 0,
            city_id,
            temperature: self.temperature,
            description: self.description.to_string(),
            icon_code: self.icon.code().to_string(),
            temp_high: self.temp_high,
            temp_low: self.temp_low,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
            uv_index: self.uv_index,
            precipitation: self.precipitation,
        }
    }

    /// 24 rows, "00:00" to "23:00"
    pub fn hourly_forecast(&self, city_id: CityId) -> Vec<HourlyForecast> {
        (0..24)
            .map(|hour| HourlyForecast {
                id: 0,
                city_id,
                hour: format!("{:02}:00", hour),
                temperature: hourly_temperature(self.temperature, hour),
                icon_code: self.icon.code().to_string(),
            })
            .collect()
    }

    /// 7 rows, Monday first
    pub fn daily_forecast(&self, city_id: CityId) -> Vec<DailyForecast> {
        DAY_NAMES
            .iter()
            .zip(DAILY_ICONS.iter())
            .enumerate()
            .map(|(i, (day, icon))| {
                let (temp_high, temp_low) = daily_temperatures(self.temp_high, self.temp_low, i);
                DailyForecast {
                    id: 0,
                    city_id,
                    day_name: (*day).to_string(),
                    temp_high,
                    temp_low,
                    icon_code: icon.code().to_string(),
                }
            })
            .collect()
    }
}
