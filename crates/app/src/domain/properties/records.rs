//! Property Records

use serde::{Deserialize, Serialize};

use crate::{
    documents::{Record, ValidationError},
    uuids::TypedUuid,
};

/// Property UUID
pub type PropertyUuid = TypedUuid<Property>;

/// A rented property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Display name.
    pub name: String,

    /// Street address.
    pub address: String,

    /// Monthly rent in minor currency units.
    pub monthly_rent: u64,

    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record for Property {
    fn collection() -> &'static str {
        "properties"
    }

    fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::require_text("name", &self.name, 200)?;
        ValidationError::require_text("address", &self.address, 500)?;

        if let Some(notes) = &self.notes {
            ValidationError::limit_text("notes", notes, 2_000)?;
        }

        Ok(())
    }
}
