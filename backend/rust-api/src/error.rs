use thiserror::Error;

/// Failures surfaced by the catalog. Streams have none of their own.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Movie not found: {0}")]
    NotFound(String),

    #[error("Catalog store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        CatalogError::StoreUnavailable(err.to_string())
    }
}
