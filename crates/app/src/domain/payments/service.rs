//! Payments service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;

use crate::{
    documents::{Document, NewDocument, Record, Repository, RepositoryError},
    domain::{
        payment_methods::{PaymentMethod, PaymentMethodUuid},
        payments::{errors::PaymentsServiceError, records::Payment},
        properties::Property,
    },
    pagination::{Page, PageRequest},
    tenants::TenantId,
};

/// [`PaymentsService`] over the document repositories.
#[derive(Clone)]
pub struct DocumentPaymentsService {
    payments: Arc<dyn Repository<Payment>>,
    properties: Arc<dyn Repository<Property>>,
    payment_methods: Arc<dyn Repository<PaymentMethod>>,
}

impl fmt::Debug for DocumentPaymentsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentPaymentsService")
            .finish_non_exhaustive()
    }
}

impl DocumentPaymentsService {
    /// Build the service from its repositories.
    #[must_use]
    pub fn new(
        payments: Arc<dyn Repository<Payment>>,
        properties: Arc<dyn Repository<Property>>,
        payment_methods: Arc<dyn Repository<PaymentMethod>>,
    ) -> Self {
        Self {
            payments,
            properties,
            payment_methods,
        }
    }

    async fn payment_method_exists(
        &self,
        tenant: &TenantId,
        uuid: PaymentMethodUuid,
    ) -> Result<bool, RepositoryError> {
        for owner in [tenant.clone(), TenantId::system()] {
            match self.payment_methods.get_by_id(&owner, uuid).await {
                Ok(_) => return Ok(true),
                Err(RepositoryError::NotFound) => {}
                Err(error) => return Err(error),
            }
        }

        Ok(false)
    }
}

#[async_trait]
impl PaymentsService for DocumentPaymentsService {
    #[tracing::instrument(
        name = "payments.service.available_payment_methods",
        skip_all,
        fields(tenant = %tenant),
        err
    )]
    async fn available_payment_methods(
        &self,
        tenant: &TenantId,
    ) -> Result<Vec<Document<PaymentMethod>>, PaymentsServiceError> {
        let mut methods = self.payment_methods.get_all(&TenantId::system()).await?;

        if !tenant.is_system() {
            methods.extend(self.payment_methods.get_all(tenant).await?);
        }

        Ok(methods)
    }

    #[tracing::instrument(
        name = "payments.service.record_payment",
        skip_all,
        fields(tenant = %tenant),
        err
    )]
    async fn record_payment(
        &self,
        tenant: &TenantId,
        payment: NewDocument<Payment>,
    ) -> Result<Document<Payment>, PaymentsServiceError> {
        payment.data.validate().map_err(RepositoryError::from)?;

        match self
            .properties
            .get_by_id(tenant, payment.data.property_uuid)
            .await
        {
            Ok(_) => {}
            Err(RepositoryError::NotFound) => return Err(PaymentsServiceError::UnknownProperty),
            Err(error) => return Err(error.into()),
        }

        if !self
            .payment_method_exists(tenant, payment.data.payment_method_uuid)
            .await?
        {
            return Err(PaymentsServiceError::UnknownPaymentMethod);
        }

        Ok(self.payments.create(tenant, payment).await?)
    }

    #[tracing::instrument(
        name = "payments.service.payments_page",
        skip_all,
        fields(
            tenant = %tenant,
            page_number = request.page_number(),
            page_size = request.page_size()
        ),
        err
    )]
    async fn payments_page(
        &self,
        tenant: &TenantId,
        request: PageRequest,
    ) -> Result<Page<Document<Payment>>, PaymentsServiceError> {
        Ok(self.payments.get_page(tenant, request).await?)
    }
}

/// Payment recording and payment method lookup.
#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// System default payment methods followed by the tenant's own.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentsServiceError::Repository`] when the store fails.
    async fn available_payment_methods(
        &self,
        tenant: &TenantId,
    ) -> Result<Vec<Document<PaymentMethod>>, PaymentsServiceError>;

    /// Records a payment against one of the tenant's properties.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentsServiceError::UnknownProperty`] or
    /// [`PaymentsServiceError::UnknownPaymentMethod`] for dangling references,
    /// and a repository error for invalid input or store failures.
    async fn record_payment(
        &self,
        tenant: &TenantId,
        payment: NewDocument<Payment>,
    ) -> Result<Document<Payment>, PaymentsServiceError>;

    /// Retrieves one page of the tenant's payments.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentsServiceError::Repository`] when the store fails.
    async fn payments_page(
        &self,
        tenant: &TenantId,
        request: PageRequest,
    ) -> Result<Page<Document<Payment>>, PaymentsServiceError>;
}
