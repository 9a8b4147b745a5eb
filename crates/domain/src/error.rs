//! Domain error types.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::repository::RepositoryError;

/// Faults that abort a command.
///
/// Validation failures are not errors; they travel as
/// [`CommandOutcome::Rejected`](crate::CommandOutcome::Rejected).
#[derive(Debug, Error)]
pub enum DomainError {
    /// The repository failed. The storage error is carried through as-is.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// An entity invariant was violated.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
