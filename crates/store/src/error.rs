use thiserror::Error;

/// Errors raised while setting up the PostgreSQL store.
///
/// Repository calls report through [`domain::RepositoryError`] instead, with
/// the sqlx error kept as the source.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for store setup operations.
pub type Result<T> = std::result::Result<T, StoreError>;
