//! Error taxonomy shared by the Aeris crates.
//!
//! Storage, configuration and location failures each have a leaf enum.
//! `AppError` wraps them together with rejected user actions, and its
//! `user_message()` is what a screen shows in a notification.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A user action that was refused, such as hiding the primary city.
    /// The message is already in the display language.
    #[error("Action rejected: {0}")]
    Rejected(String),

    /// Background task failures mapped from the UI crate
    #[error("Service error: {0}")]
    Service(String),
}

impl AppError {
    /// Text for the notification shown to the user
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => e.user_message().to_string(),
            AppError::Config(e) => e.user_message().to_string(),
            AppError::Location(e) => e.user_message().to_string(),
            AppError::Io(_) => "Could not read or write local files.".to_string(),
            AppError::Rejected(msg) => msg.clone(),
            AppError::Service(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// Failures of the embedded weather database
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Constraint violated: {0}")]
    Constraint(String),

    #[error("Data corruption detected: {0}")]
    Corruption(String),

    #[error("Seeding failed: {0}")]
    SeedFailed(String),
}

impl DatabaseError {
    pub fn user_message(&self) -> &'static str {
        match self {
            DatabaseError::ConnectionFailed(_) => {
                "Unable to open the weather data. Try restarting the app."
            }
            DatabaseError::QueryFailed(_) => "Reading the weather data failed.",
            DatabaseError::Constraint(_) => "The weather data could not be saved.",
            DatabaseError::Corruption(_) => {
                "The weather data is damaged. Delete weather_app.db to rebuild it."
            }
            DatabaseError::SeedFailed(_) => {
                "Failed to prepare weather data. Try restarting the app."
            }
        }
    }
}

/// Problems with `config.toml` or the values in it
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check config.toml.",
            ConfigError::ParseError(_) => "config.toml is malformed.",
        }
    }
}

/// Device location errors
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location service unavailable")]
    ServiceUnavailable,

    #[error("Invalid coordinates: {latitude}, {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

impl LocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            LocationError::PermissionDenied => "Location permission was denied.",
            LocationError::ServiceUnavailable => "Available soon",
            LocationError::InvalidCoordinates { .. } => "Error: invalid coordinates",
        }
    }
}

/// Classify a rusqlite failure
pub trait RusqliteErrorExt {
    fn into_database_error(self) -> DatabaseError;
}

impl RusqliteErrorExt for rusqlite::Error {
    fn into_database_error(self) -> DatabaseError {
        match &self {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("corrupt") => {
                DatabaseError::Corruption(self.to_string())
            }
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                DatabaseError::Constraint(self.to_string())
            }
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::CannotOpen =>
            {
                DatabaseError::ConnectionFailed(self.to_string())
            }
            _ => DatabaseError::QueryFailed(self.to_string()),
        }
    }
}
