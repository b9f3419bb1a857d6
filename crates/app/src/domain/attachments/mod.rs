//! Attachments
//!
//! Metadata for files attached to payments. File contents are stored
//! outside the document store.

pub mod records;

pub use records::{Attachment, AttachmentUuid};
