use thiserror::Error;

/// Failures surfaced by contact operations.
///
/// A missing contact is not an error; lookups return `Ok(None)`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
    #[error("integrity error: {0}")]
    Integrity(String),
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
    #[error("{0:?} backend is not supported")]
    UnsupportedBackend(sea_orm::DatabaseBackend),
}
