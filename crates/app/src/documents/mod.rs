//! Documents
//!
//! A small document store over a single `documents` table. Each record type
//! names its collection and gets a [`Repository`] instance scoped by tenant.

pub mod errors;
pub mod records;
mod repository;
mod store;

pub use errors::{RepositoryError, ValidationError};
pub use records::{Document, NewDocument, Record};
pub use repository::*;
