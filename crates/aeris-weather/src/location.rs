//! Device location. Not implemented on any platform yet, so every request
//! reports the service as unavailable.

use crate::types::{Location, LocationError};

pub async fn get_current_location() -> Result<Location, LocationError> {
    tracing::debug!("Current location requested but no location backend is available");
    Err(LocationError::ServiceUnavailable)
}
