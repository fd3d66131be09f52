//! "Use current location" backend.
//! The lookup runs off the UI thread; the result comes back via mpsc.

use tokio::runtime::Handle;

use aeris_weather::locale::Message;
use aeris_weather::{Language, Location, LocationError};

/// Error type for location requests
#[derive(Debug, Clone, PartialEq)]
pub enum LocationServiceError {
    /// No location backend on this platform yet
    Unavailable,
    PermissionDenied,
    Failed(String),
}

impl LocationServiceError {
    pub fn user_message(&self, language: Language) -> String {
        match self {
            LocationServiceError::Unavailable => Message::AvailableSoon.text(language).to_string(),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for LocationServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationServiceError::Unavailable => write!(f, "Location service unavailable"),
            LocationServiceError::PermissionDenied => write!(f, "Location permission denied"),
            LocationServiceError::Failed(s) => write!(f, "Location error: {}", s),
        }
    }
}

impl std::error::Error for LocationServiceError {}

impl From<LocationError> for LocationServiceError {
    fn from(e: LocationError) -> Self {
        match e {
            LocationError::ServiceUnavailable => LocationServiceError::Unavailable,
            LocationError::PermissionDenied => LocationServiceError::PermissionDenied,
            other => LocationServiceError::Failed(other.to_string()),
        }
    }
}

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum LocationServiceMessage {
    Done(Result<Location, LocationServiceError>),
}

/// Look up the device location asynchronously.
/// Sends `Done` on the channel when complete.
pub fn request_current_location(
    tx: &std::sync::mpsc::Sender<LocationServiceMessage>,
    runtime: &Handle,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = aeris_weather::location::get_current_location()
            .await
            .map_err(LocationServiceError::from);
        match &result {
            Ok(loc) => tracing::info!("Got location: {}, {}", loc.latitude, loc.longitude),
            Err(e) => tracing::info!("Current location not available: {}", e),
        }
        let _ = tx.send(LocationServiceMessage::Done(result));
    });
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    use std::time::Duration;

    #[test]
    fn test_error_display() {
        assert!(format!("{}", LocationServiceError::Unavailable).contains("unavailable"));
        assert!(format!("{}", LocationServiceError::Failed("gps".into())).contains("gps"));
    }

    #[test]
    fn test_unavailable_message() {
        assert_eq!(
            LocationServiceError::Unavailable.user_message(Language::English),
            "Available soon"
        );
        assert_eq!(
            LocationServiceError::Unavailable.user_message(Language::Spanish),
            "Disponible próximamente"
        );
    }

    #[test]
    fn test_request_reports_available_soon() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let (tx, rx) = std::sync::mpsc::channel();

        request_current_location(&tx, runtime.handle());

        let LocationServiceMessage::Done(result) = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(result.unwrap_err(), LocationServiceError::Unavailable);
    }
}
