use aeris_core::AppError;
use aeris_weather::locale::Message;
use aeris_weather::Language;

use super::store_error;
use crate::models::ModelError;

impl From<ModelError> for AppError {
    fn from(e: ModelError) -> Self {
        model_error(e, Language::default())
    }
}

pub fn model_error(e: ModelError, language: Language) -> AppError {
    match e {
        ModelError::UnknownCity { .. } => {
            AppError::Rejected(Message::CityNotFound.text(language).to_string())
        }
        ModelError::Store(e) => store_error(e),
    }
}
