use aeris_core::{AppError, DatabaseError, RusqliteErrorExt};

pub fn store_error(e: aeris_store::Error) -> AppError {
    match e {
        aeris_store::Error::Database(e) => AppError::Database(e.into_database_error()),
        aeris_store::Error::CreateDirectory { path, source } => AppError::Database(
            DatabaseError::ConnectionFailed(format!("{}: {}", path.display(), source)),
        ),
        aeris_store::Error::Seed { city, source } => {
            AppError::Database(DatabaseError::SeedFailed(format!("{}: {}", city, source)))
        }
        aeris_store::Error::Task(e) => AppError::Service(e.to_string()),
    }
}
