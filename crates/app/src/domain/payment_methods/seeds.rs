//! Default payment methods.

use uuid::Uuid;

use crate::{
    domain::payment_methods::records::{PaymentMethod, PaymentMethodUuid},
    seeding::SeedDescriptor,
};

/// Fixed identifier of the Bank Transfer default.
pub const BANK_TRANSFER_UUID: PaymentMethodUuid =
    PaymentMethodUuid::from_uuid(Uuid::from_u128(0x0000_0000_0000_7000_8000_0000_0000_0001));

/// Fixed identifier of the Cash default.
pub const CASH_UUID: PaymentMethodUuid =
    PaymentMethodUuid::from_uuid(Uuid::from_u128(0x0000_0000_0000_7000_8000_0000_0000_0002));

/// Fixed identifier of the Check default.
pub const CHECK_UUID: PaymentMethodUuid =
    PaymentMethodUuid::from_uuid(Uuid::from_u128(0x0000_0000_0000_7000_8000_0000_0000_0003));

/// Payment methods every tenant can use.
///
/// Identifiers are fixed so that concurrent seeders collide on the store's
/// uniqueness constraint instead of inserting duplicates.
#[must_use]
pub fn default_payment_methods() -> Vec<SeedDescriptor<PaymentMethod>> {
    vec![
        descriptor(
            "bank-transfer",
            BANK_TRANSFER_UUID,
            "Bank Transfer",
            "Direct transfer between bank accounts",
        ),
        descriptor("cash", CASH_UUID, "Cash", "Cash payment"),
        descriptor("check", CHECK_UUID, "Check", "Payment by check"),
    ]
}

fn descriptor(
    key: &'static str,
    uuid: PaymentMethodUuid,
    name: &str,
    description: &str,
) -> SeedDescriptor<PaymentMethod> {
    SeedDescriptor {
        key,
        uuid,
        data: PaymentMethod {
            name: name.to_string(),
            description: description.to_string(),
            is_system_default: true,
        },
    }
}
