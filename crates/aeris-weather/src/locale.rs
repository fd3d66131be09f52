//! Translation of the Spanish text stored by the seed data, plus the few
//! user-facing strings the screens need.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "en")]
    English,
}

impl Language {
    fn pick(self, spanish: &'static str, english: &'static str) -> &'static str {
        match self {
            Self::Spanish => spanish,
            Self::English => english,
        }
    }
}

/// Translate a stored condition description. Unknown text is returned as-is.
pub fn translate_description(description: &str, language: Language) -> String {
    let translated = match description.to_lowercase().as_str() {
        "soleado" => language.pick("Soleado", "Sunny"),
        "parcialmente nublado" | "parcialmente_nublado" => {
            language.pick("Parcialmente nublado", "Partly cloudy")
        }
        "nublado" => language.pick("Nublado", "Cloudy"),
        "lluvioso" | "lluvia" => language.pick("Lluvioso", "Rainy"),
        "tormenta" => language.pick("Tormenta", "Stormy"),
        "nieve" => language.pick("Nieve", "Snowy"),
        _ => return description.to_string(),
    };
    translated.to_string()
}

/// Translate a stored Spanish weekday name. Unknown text is returned as-is.
pub fn translate_day(day: &str, language: Language) -> String {
    let translated = match day.to_lowercase().as_str() {
        "lunes" => language.pick("Lunes", "Monday"),
        "martes" => language.pick("Martes", "Tuesday"),
        "miércoles" | "miercoles" => language.pick("Miércoles", "Wednesday"),
        "jueves" => language.pick("Jueves", "Thursday"),
        "viernes" => language.pick("Viernes", "Friday"),
        "sábado" | "sabado" => language.pick("Sábado", "Saturday"),
        "domingo" => language.pick("Domingo", "Sunday"),
        _ => return day.to_string(),
    };
    translated.to_string()
}

/// Weekday name by index, Monday = 0
pub fn weekday_name(index: usize, language: Language) -> &'static str {
    const SPANISH: [&str; 7] = [
        "Lunes",
        "Martes",
        "Miércoles",
        "Jueves",
        "Viernes",
        "Sábado",
        "Domingo",
    ];
    const ENGLISH: [&str; 7] = [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];
    let names = match language {
        Language::Spanish => &SPANISH,
        Language::English => &ENGLISH,
    };
    names[index % 7]
}

/// Month abbreviation by index, January = 0
pub fn month_abbreviation(index: usize, language: Language) -> &'static str {
    const SPANISH: [&str; 12] = [
        "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
    ];
    const ENGLISH: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    let names = match language {
        Language::Spanish => &SPANISH,
        Language::English => &ENGLISH,
    };
    names[index % 12]
}

/// UV exposure band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvLevel {
    Low,
    Medium,
    High,
}

impl UvLevel {
    pub fn from_index(index: i32) -> Self {
        match index {
            i if i <= 2 => Self::Low,
            i if i <= 5 => Self::Medium,
            _ => Self::High,
        }
    }

    pub fn label(self, language: Language) -> &'static str {
        match self {
            Self::Low => language.pick("Bajo", "Low"),
            Self::Medium => language.pick("Medio", "Medium"),
            Self::High => language.pick("Alto", "High"),
        }
    }
}

/// Fixed user-facing strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    NoData,
    PrimaryCityCannotBeRemoved,
    AvailableSoon,
    InvalidCoordinates,
    CityNotFound,
}

impl Message {
    pub fn text(self, language: Language) -> &'static str {
        match self {
            Self::NoData => language.pick("Sin datos", "No data"),
            Self::PrimaryCityCannotBeRemoved => language.pick(
                "No puedes eliminar la ciudad principal",
                "You can't remove the primary city",
            ),
            Self::AvailableSoon => language.pick("Disponible próximamente", "Available soon"),
            Self::InvalidCoordinates => language.pick(
                "Error: coordenadas no válidas",
                "Error: invalid coordinates",
            ),
            Self::CityNotFound => language.pick("Ciudad no encontrada", "City not found"),
        }
    }
}
