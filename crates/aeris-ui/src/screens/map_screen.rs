//! Map screen: an embedded OpenStreetMap view centred on a city.

use url::Url;

use aeris_core::{AppError, LocationError};
use aeris_weather::locale::Message;
use aeris_weather::{map_viewer_url, City, Language, Location};

use crate::error_mapping::location_error;

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub title: String,
    pub url: Url,
}

pub fn present_map(city: &City) -> Result<MapView, AppError> {
    let url = map_viewer_url(&Location::from(city)).map_err(location_error)?;
    tracing::debug!("Map for {}: {}", city.name, url);
    Ok(MapView {
        title: city.name.clone(),
        url,
    })
}

/// Notification shown when the map can't be opened
pub fn map_error_message(error: &AppError, language: Language) -> String {
    match error {
        AppError::Location(LocationError::InvalidCoordinates { .. }) => {
            Message::InvalidCoordinates.text(language).to_string()
        }
        AppError::Location(LocationError::ServiceUnavailable) => {
            Message::AvailableSoon.text(language).to_string()
        }
        other => other.user_message(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_map_for_city() {
        let city = City::new("Madrid", 40.4167, -3.7038);
        let view = present_map(&city).unwrap();
        assert_eq!(view.title, "Madrid");
        assert_eq!(view.url.host_str(), Some("www.openstreetmap.org"));
        assert!(view
            .url
            .query()
            .unwrap()
            .contains("marker=40.4167,-3.7038"));
    }

    #[test]
    fn test_zero_coordinates_rejected() {
        let err = present_map(&City::new("Null Island", 0.0, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            AppError::Location(LocationError::InvalidCoordinates { .. })
        ));
        assert_eq!(
            map_error_message(&err, Language::English),
            "Error: invalid coordinates"
        );
        assert_eq!(
            map_error_message(&err, Language::Spanish),
            "Error: coordenadas no válidas"
        );
    }
}
