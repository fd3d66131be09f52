use aeris_weather::CityId;

/// Why a view model refused to build or to change its selection
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The id does not name a stored city, so it can't be the primary city
    #[error("City {city_id} does not exist")]
    UnknownCity { city_id: CityId },

    #[error(transparent)]
    Store(#[from] aeris_store::Error),
}

/// Fails unless `city_id` is a stored city
pub(crate) fn require_city(
    repository: &aeris_store::WeatherRepository,
    city_id: CityId,
) -> Result<(), ModelError> {
    match repository.city(city_id)? {
        Some(_) => Ok(()),
        None => {
            tracing::warn!("Rejected unknown city {}", city_id);
            Err(ModelError::UnknownCity { city_id })
        }
    }
}
