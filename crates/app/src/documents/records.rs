//! Document Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{documents::errors::ValidationError, tenants::TenantId, uuids::TypedUuid};

/// A record type stored through the document repository.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection the record type is stored under.
    fn collection() -> &'static str;

    /// Check the payload before it is written.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the first invalid field.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// A stored record with its server-assigned fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document<T> {
    /// Identifier, assigned once.
    pub uuid: TypedUuid<T>,

    /// Owning tenant, assigned at creation.
    pub tenant: TenantId,

    /// Creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,

    /// Record payload.
    #[serde(flatten)]
    pub data: T,
}

/// Input for creating a record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument<T> {
    /// Caller-chosen identifier; generated when `None`.
    pub uuid: Option<TypedUuid<T>>,

    /// Record payload.
    pub data: T,
}

impl<T> NewDocument<T> {
    /// Input with a generated identifier.
    #[must_use]
    pub fn new(data: T) -> Self {
        Self { uuid: None, data }
    }

    /// Input with a caller-chosen identifier.
    #[must_use]
    pub fn with_uuid(uuid: TypedUuid<T>, data: T) -> Self {
        Self {
            uuid: Some(uuid),
            data,
        }
    }
}
