use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("record not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(diesel::result::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl From<diesel::result::Error> for RepositoryError {
    fn from(error: diesel::result::Error) -> Self {
        match error {
            diesel::result::Error::NotFound => RepositoryError::NotFound,
            other => RepositoryError::Database(other),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failure of the corpus provider.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("article store unavailable: {0}")]
    StoreUnavailable(#[source] RepositoryError),
}
