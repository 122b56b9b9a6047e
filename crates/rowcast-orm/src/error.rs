//! Error types for the ORM.

use rowcast_core::{CriteriaError, MapError, RegistryError};
use thiserror::Error;

/// ORM-specific errors.
#[derive(Debug, Error)]
pub enum OrmError {
    /// Driver error from sqlx, surfaced unchanged.
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Table lookup failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Criteria could not be compiled.
    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    /// A row could not be mapped.
    #[error(transparent)]
    Map(#[from] MapError),

    /// No object found matching the query.
    #[error("object not found")]
    NotFound,

    /// Multiple objects found when exactly one was expected.
    #[error("multiple objects returned when one was expected")]
    MultipleObjectsReturned,
}

/// Result type alias for ORM operations.
pub type Result<T> = std::result::Result<T, OrmError>;
