//! Properties

pub mod records;

pub use records::{Property, PropertyUuid};
