//! Rent Tracking Domain

pub mod attachments;
pub mod payment_methods;
pub mod payments;
pub mod properties;
