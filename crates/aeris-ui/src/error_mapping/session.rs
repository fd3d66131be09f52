use aeris_core::AppError;
use aeris_weather::Language;

use crate::session::SessionError;

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        session_rejection(e, Language::default())
    }
}

/// Rejection carrying the notification text in the display language
pub fn session_rejection(e: SessionError, language: Language) -> AppError {
    AppError::Rejected(e.user_message(language).to_string())
}
