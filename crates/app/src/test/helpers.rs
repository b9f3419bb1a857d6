//! Test Helpers

use jiff::civil::date;

use crate::{
    documents::{Document, NewDocument, Repository, RepositoryError},
    domain::{
        payment_methods::{PaymentMethod, PaymentMethodUuid},
        payments::Payment,
        properties::{Property, PropertyUuid},
    },
    tenants::TenantId,
    test::TestContext,
};

pub(crate) fn property(name: &str) -> Property {
    Property {
        name: name.to_string(),
        address: format!("{name}, 1 High Street"),
        monthly_rent: 1_200_00,
        notes: None,
    }
}

pub(crate) fn payment(property: PropertyUuid, method: PaymentMethodUuid) -> Payment {
    Payment {
        property_uuid: property,
        payment_method_uuid: method,
        amount: 1_200_00,
        paid_on: date(2026, 4, 1),
        reference: None,
    }
}

pub(crate) async fn create_property(
    ctx: &TestContext,
    tenant: &TenantId,
    name: &str,
) -> Result<Document<Property>, RepositoryError> {
    ctx.properties
        .create(tenant, NewDocument::new(property(name)))
        .await
}

pub(crate) async fn create_payment_method(
    ctx: &TestContext,
    tenant: &TenantId,
    name: &str,
) -> Result<Document<PaymentMethod>, RepositoryError> {
    ctx.payment_methods
        .create(
            tenant,
            NewDocument::new(PaymentMethod {
                name: name.to_string(),
                description: String::new(),
                is_system_default: false,
            }),
        )
        .await
}
