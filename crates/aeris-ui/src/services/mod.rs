pub mod location_service;

pub use location_service::{
    request_current_location, LocationServiceError, LocationServiceMessage,
};
