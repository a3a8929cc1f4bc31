#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database could not be opened, migrated, or queried, or a stored
    /// row could not be decoded. The attempted operation did not take effect.
    #[error("Storage unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        StoreError::Unavailable(sqlx::Error::Migrate(Box::new(e)))
    }
}

impl From<validator::ValidationErrors> for StoreError {
    fn from(e: validator::ValidationErrors) -> Self {
        StoreError::Validation(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
