//! Document repository errors.

use std::num::TryFromIntError;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Record payload validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Tenant identifier was blank.
    #[error("tenant identifier cannot be empty")]
    EmptyTenant,

    /// Tenant identifier exceeded the length limit.
    #[error("tenant identifier cannot exceed {max} characters")]
    TenantTooLong { max: usize },

    /// A required text field was blank.
    #[error("`{field}` is required")]
    MissingField { field: &'static str },

    /// A numeric field had to be positive.
    #[error("`{field}` must be greater than zero")]
    NotPositive { field: &'static str },

    /// A text field exceeded its length limit.
    #[error("`{field}` cannot exceed {max} characters")]
    TooLong { field: &'static str, max: usize },
}

impl ValidationError {
    /// Reject blank or overlong text.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] or [`ValidationError::TooLong`].
    pub fn require_text(field: &'static str, value: &str, max: usize) -> Result<(), Self> {
        if value.trim().is_empty() {
            return Err(Self::MissingField { field });
        }

        Self::limit_text(field, value, max)
    }

    /// Reject overlong text.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TooLong`].
    pub fn limit_text(field: &'static str, value: &str, max: usize) -> Result<(), Self> {
        if value.chars().count() > max {
            return Err(Self::TooLong { field, max });
        }

        Ok(())
    }
}

/// Repository error variants.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Record does not exist for this tenant.
    #[error("record not found")]
    NotFound,

    /// A record with the same identifier already exists.
    #[error("record already exists")]
    AlreadyExists,

    /// Record payload failed validation.
    #[error("invalid record: {0}")]
    Validation(#[from] ValidationError),

    /// Store rejected a row missing required data.
    #[error("missing required data")]
    MissingRequiredData,

    /// Store rejected a row failing a check constraint.
    #[error("invalid data")]
    InvalidData,

    /// Underlying store failure.
    #[error("store unavailable")]
    StoreUnavailable(#[source] Error),

    /// Stored body could not be encoded or decoded.
    #[error("document encoding failed")]
    Encoding(#[from] serde_json::Error),

    /// Stored timestamp was out of range.
    #[error("invalid stored timestamp")]
    InvalidTimestamp(#[from] jiff::Error),

    /// Count or offset did not fit the store's integer type.
    #[error("value out of range")]
    OutOfRange(#[from] TryFromIntError),
}

impl From<Error> for RepositoryError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::StoreUnavailable(error),
        }
    }
}
