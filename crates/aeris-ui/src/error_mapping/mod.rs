//! Maps UI, store and location errors to aeris_core::AppError for consistent
//! user-facing messages. The store and weather error types live in other
//! crates, so those mappings are plain functions rather than `From` impls.

mod location;
mod model;
mod session;
mod store;

pub use location::{core_language, location_error};
pub use model::model_error;
pub use session::session_rejection;
pub use store::store_error;
