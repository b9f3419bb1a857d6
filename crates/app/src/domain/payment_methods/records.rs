//! Payment Method Records

use serde::{Deserialize, Serialize};

use crate::{
    documents::{Record, ValidationError},
    seeding::SystemDefault,
    uuids::TypedUuid,
};

/// Payment Method UUID
pub type PaymentMethodUuid = TypedUuid<PaymentMethod>;

/// A way rent can be paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,

    /// Set on the defaults owned by the system tenant.
    pub is_system_default: bool,
}

impl Record for PaymentMethod {
    fn collection() -> &'static str {
        "payment_methods"
    }

    fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::require_text("name", &self.name, 100)?;
        ValidationError::limit_text("description", &self.description, 500)
    }
}

impl SystemDefault for PaymentMethod {
    fn mark_system_default(&mut self) {
        self.is_system_default = true;
    }
}
