use aeris_core::{AppError, LocationError as CoreLocationError};
use aeris_weather::{Language, LocationError};

use crate::services::LocationServiceError;

impl From<LocationServiceError> for AppError {
    fn from(e: LocationServiceError) -> Self {
        match e {
            LocationServiceError::Unavailable => {
                AppError::Location(CoreLocationError::ServiceUnavailable)
            }
            LocationServiceError::PermissionDenied => {
                AppError::Location(CoreLocationError::PermissionDenied)
            }
            LocationServiceError::Failed(s) => AppError::Service(s),
        }
    }
}

pub fn location_error(e: LocationError) -> AppError {
    match e {
        LocationError::PermissionDenied => AppError::Location(CoreLocationError::PermissionDenied),
        LocationError::ServiceUnavailable => {
            AppError::Location(CoreLocationError::ServiceUnavailable)
        }
        LocationError::InvalidCoordinates {
            latitude,
            longitude,
        } => AppError::Location(CoreLocationError::InvalidCoordinates {
            latitude,
            longitude,
        }),
        LocationError::Other(s) => AppError::Service(s),
    }
}

/// Display language from the config file
pub fn core_language(language: aeris_core::Language) -> Language {
    match language {
        aeris_core::Language::Spanish => Language::Spanish,
        aeris_core::Language::English => Language::English,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_coordinates_message() {
        let app = location_error(LocationError::InvalidCoordinates {
            latitude: 0.0,
            longitude: 0.0,
        });
        assert_eq!(app.user_message(), "Error: invalid coordinates");
    }

    #[test]
    fn test_unavailable_service() {
        let app: AppError = LocationServiceError::Unavailable.into();
        assert_eq!(app.user_message(), "Available soon");
        assert!(matches!(
            location_error(LocationError::Other("x".into())),
            AppError::Service(_)
        ));
    }

    #[test]
    fn test_core_language() {
        assert_eq!(core_language(aeris_core::Language::English), Language::English);
        assert_eq!(core_language(aeris_core::Language::default()), Language::Spanish);
    }
}
