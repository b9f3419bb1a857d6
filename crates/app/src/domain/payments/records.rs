//! Payment Records

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    documents::{Record, ValidationError},
    domain::{payment_methods::PaymentMethodUuid, properties::PropertyUuid},
    uuids::TypedUuid,
};

/// Payment UUID
pub type PaymentUuid = TypedUuid<Payment>;

/// A rent payment received for a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Property the rent is for.
    pub property_uuid: PropertyUuid,
    /// How the rent was paid.
    pub payment_method_uuid: PaymentMethodUuid,

    /// Amount in minor currency units.
    pub amount: u64,

    /// Date the payment was received.
    pub paid_on: Date,

    /// Bank reference, check number or similar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Record for Payment {
    fn collection() -> &'static str {
        "payments"
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.amount == 0 {
            return Err(ValidationError::NotPositive { field: "amount" });
        }

        if let Some(reference) = &self.reference {
            ValidationError::limit_text("reference", reference, 200)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    fn payment() -> Payment {
        Payment {
            property_uuid: PropertyUuid::new(),
            payment_method_uuid: PaymentMethodUuid::new(),
            amount: 950_00,
            paid_on: date(2026, 3, 1),
            reference: Some("MARCH-RENT".to_string()),
        }
    }

    #[test]
    fn zero_amount_is_rejected() {
        let payment = Payment {
            amount: 0,
            ..payment()
        };

        assert_eq!(
            payment.validate(),
            Err(ValidationError::NotPositive { field: "amount" })
        );
    }

    #[test]
    fn serializes_with_camel_case_fields() -> TestResult {
        let payment = payment();

        let value = serde_json::to_value(&payment)?;

        assert_eq!(value["amount"], 95_000);
        assert_eq!(value["paidOn"], "2026-03-01");
        assert_eq!(
            value["propertyUuid"],
            serde_json::Value::String(payment.property_uuid.to_string())
        );

        Ok(())
    }
}
