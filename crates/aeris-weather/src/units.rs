//! Presentation-time unit conversion. Stored values are always °C and km/h.

use serde::{Deserialize, Serialize};

/// Kilometres per mile used for wind speed conversion
pub const KM_PER_MILE: f64 = 1.609;

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn kph_to_mph(kph: f64) -> f64 {
    kph / KM_PER_MILE
}

/// Whole number shown on screen. Truncates toward zero.
pub fn display_value(value: f64) -> i32 {
    value as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn from_fahrenheit_flag(use_fahrenheit: bool) -> Self {
        if use_fahrenheit {
            Self::Fahrenheit
        } else {
            Self::Celsius
        }
    }

    /// Convert a stored °C value into this unit
    pub fn convert(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius_to_fahrenheit(celsius),
        }
    }

    /// "25°"
    pub fn format(self, celsius: f64) -> String {
        format!("{}°", display_value(self.convert(celsius)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpeedUnit {
    #[default]
    Kph,
    Mph,
}

impl SpeedUnit {
    pub fn from_mph_flag(use_mph: bool) -> Self {
        if use_mph {
            Self::Mph
        } else {
            Self::Kph
        }
    }

    /// Convert a stored km/h value into this unit
    pub fn convert(self, kph: f64) -> f64 {
        match self {
            Self::Kph => kph,
            Self::Mph => kph_to_mph(kph),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Kph => "km/h",
            Self::Mph => "mph",
        }
    }

    /// "10 km/h"
    pub fn format(self, kph: f64) -> String {
        format!("{} {}", display_value(self.convert(kph)), self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celsius_to_fahrenheit() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
        assert!((celsius_to_fahrenheit(25.0) - 77.0).abs() < 1e-9);
    }

    #[test]
    fn test_kph_to_mph() {
        assert!((kph_to_mph(16.09) - 10.0).abs() < 1e-9);
        assert_eq!(kph_to_mph(0.0), 0.0);
    }

    #[test]
    fn test_display_truncates_toward_zero() {
        assert_eq!(display_value(26.9), 26);
        assert_eq!(display_value(-3.7), -3);
        assert_eq!(display_value(30.0), 30);
    }

    #[test]
    fn test_temperature_format() {
        assert_eq!(TemperatureUnit::Celsius.format(25.0), "25°");
        assert_eq!(TemperatureUnit::Fahrenheit.format(25.0), "77°");
    }

    #[test]
    fn test_speed_format() {
        assert_eq!(SpeedUnit::Kph.format(10.0), "10 km/h");
        // 10 / 1.609 = 6.21...
        assert_eq!(SpeedUnit::Mph.format(10.0), "6 mph");
    }

    #[test]
    fn test_unit_flags() {
        assert_eq!(TemperatureUnit::from_fahrenheit_flag(true), TemperatureUnit::Fahrenheit);
        assert_eq!(TemperatureUnit::from_fahrenheit_flag(false), TemperatureUnit::Celsius);
        assert_eq!(SpeedUnit::from_mph_flag(true), SpeedUnit::Mph);
        assert_eq!(SpeedUnit::from_mph_flag(false), SpeedUnit::Kph);
    }
}
