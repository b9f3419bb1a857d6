//! Attachment Records

use serde::{Deserialize, Serialize};

use crate::{
    documents::{Record, ValidationError},
    domain::payments::PaymentUuid,
    uuids::TypedUuid,
};

/// Attachment UUID
pub type AttachmentUuid = TypedUuid<Attachment>;

/// File metadata attached to a payment, such as a receipt scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Payment the file belongs to.
    pub payment_uuid: PaymentUuid,
    /// Original file name.
    pub file_name: String,
    /// MIME type.
    pub content_type: String,
    /// File size in bytes.
    pub size_bytes: u64,
}

impl Record for Attachment {
    fn collection() -> &'static str {
        "attachments"
    }

    fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::require_text("fileName", &self.file_name, 255)?;
        ValidationError::require_text("contentType", &self.content_type, 255)?;

        if self.size_bytes == 0 {
            return Err(ValidationError::NotPositive { field: "sizeBytes" });
        }

        Ok(())
    }
}
