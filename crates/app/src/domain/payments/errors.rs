//! Payments service errors.

use thiserror::Error;

use crate::documents::RepositoryError;

/// Payments service errors.
#[derive(Debug, Error)]
pub enum PaymentsServiceError {
    /// Referenced property does not exist for this tenant.
    #[error("unknown property")]
    UnknownProperty,

    /// Referenced payment method is neither the tenant's nor a system default.
    #[error("unknown payment method")]
    UnknownPaymentMethod,

    /// Repository failure, including payload validation.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
