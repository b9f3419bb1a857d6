//! Payment Methods

pub mod records;
pub mod seeds;

pub use records::{PaymentMethod, PaymentMethodUuid};
pub use seeds::default_payment_methods;
