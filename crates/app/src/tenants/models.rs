//! Tenant Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize};

use crate::documents::ValidationError;

/// Reserved tenant owning shared, system-wide default records.
pub const SYSTEM_TENANT: &str = "system";

const MAX_TENANT_ID_LEN: usize = 128;

/// Opaque tenant identifier.
///
/// Always trimmed and non-empty. Every repository operation requires one, so
/// there is no way to express an unscoped query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Parse a tenant identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTenant`] for blank input and
    /// [`ValidationError::TenantTooLong`] past 128 characters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();

        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTenant);
        }

        if trimmed.chars().count() > MAX_TENANT_ID_LEN {
            return Err(ValidationError::TenantTooLong {
                max: MAX_TENANT_ID_LEN,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// The system tenant.
    #[must_use]
    pub fn system() -> Self {
        Self(SYSTEM_TENANT.to_string())
    }

    /// Whether this is the reserved system tenant.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.0 == SYSTEM_TENANT
    }

    /// Borrow the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TenantId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl FromStr for TenantId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for TenantId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;

        Self::new(raw).map_err(serde::de::Error::custom)
    }
}
