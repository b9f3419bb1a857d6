//! Tenant-scoped document repository.

use std::{fmt, marker::PhantomData};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    documents::{
        errors::RepositoryError,
        records::{Document, NewDocument, Record},
        store::{DocumentRow, SqliteDocumentStore},
    },
    pagination::{Page, PageRequest},
    tenants::TenantId,
    uuids::TypedUuid,
};

/// [`Repository`] over the shared `documents` table.
pub struct SqliteRepository<T> {
    db: Db,
    store: SqliteDocumentStore,
    _record: PhantomData<fn() -> T>,
}

impl<T> SqliteRepository<T> {
    /// Build a repository over the given database.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            store: SqliteDocumentStore::new(),
            _record: PhantomData,
        }
    }
}

impl<T> Clone for SqliteRepository<T> {
    fn clone(&self) -> Self {
        Self::new(self.db.clone())
    }
}

impl<T: Record> fmt::Debug for SqliteRepository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteRepository")
            .field("collection", &T::collection())
            .finish_non_exhaustive()
    }
}

fn into_documents<T: Record>(rows: Vec<DocumentRow>) -> Result<Vec<Document<T>>, RepositoryError> {
    rows.into_iter().map(DocumentRow::into_document).collect()
}

#[async_trait]
impl<T: Record> Repository<T> for SqliteRepository<T> {
    #[tracing::instrument(
        name = "documents.repository.get_all",
        skip_all,
        fields(collection = T::collection(), tenant = %tenant),
        err
    )]
    async fn get_all(&self, tenant: &TenantId) -> Result<Vec<Document<T>>, RepositoryError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let rows = self.store.list_documents(&mut tx, T::collection()).await?;

        tx.commit().await?;

        into_documents(rows)
    }

    #[tracing::instrument(
        name = "documents.repository.get_by_id",
        skip_all,
        fields(collection = T::collection(), tenant = %tenant, uuid = %uuid),
        err
    )]
    async fn get_by_id(
        &self,
        tenant: &TenantId,
        uuid: TypedUuid<T>,
    ) -> Result<Document<T>, RepositoryError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let row = self
            .store
            .get_document(&mut tx, T::collection(), uuid.into_uuid())
            .await?;

        tx.commit().await?;

        row.into_document()
    }

    #[tracing::instrument(
        name = "documents.repository.create",
        skip_all,
        fields(
            collection = T::collection(),
            tenant = %tenant,
            uuid = tracing::field::Empty
        ),
        err
    )]
    async fn create(
        &self,
        tenant: &TenantId,
        document: NewDocument<T>,
    ) -> Result<Document<T>, RepositoryError> {
        document.data.validate()?;

        let uuid = document.uuid.unwrap_or_else(TypedUuid::new);

        tracing::Span::current().record("uuid", tracing::field::display(uuid));

        let body = serde_json::to_string(&document.data)?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let row = self
            .store
            .create_document(
                &mut tx,
                T::collection(),
                uuid.into_uuid(),
                body,
                Timestamp::now(),
            )
            .await?;

        tx.commit().await?;

        debug!(%uuid, "created document");

        row.into_document()
    }

    #[tracing::instrument(
        name = "documents.repository.update",
        skip_all,
        fields(collection = T::collection(), tenant = %tenant, uuid = %uuid),
        err
    )]
    async fn update(
        &self,
        tenant: &TenantId,
        uuid: TypedUuid<T>,
        data: T,
    ) -> Result<Document<T>, RepositoryError> {
        data.validate()?;

        let body = serde_json::to_string(&data)?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let row = self
            .store
            .update_document(
                &mut tx,
                T::collection(),
                uuid.into_uuid(),
                body,
                Timestamp::now(),
            )
            .await?;

        tx.commit().await?;

        row.into_document()
    }

    #[tracing::instrument(
        name = "documents.repository.delete",
        skip_all,
        fields(collection = T::collection(), tenant = %tenant, uuid = %uuid),
        err
    )]
    async fn delete(&self, tenant: &TenantId, uuid: TypedUuid<T>) -> Result<(), RepositoryError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let rows_affected = self
            .store
            .delete_document(&mut tx, T::collection(), uuid.into_uuid())
            .await?;

        if rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "documents.repository.count",
        skip_all,
        fields(collection = T::collection(), tenant = %tenant),
        err
    )]
    async fn count(&self, tenant: &TenantId) -> Result<u64, RepositoryError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let count = self.store.count_documents(&mut tx, T::collection()).await?;

        tx.commit().await?;

        Ok(u64::try_from(count)?)
    }

    #[tracing::instrument(
        name = "documents.repository.get_page",
        skip_all,
        fields(
            collection = T::collection(),
            tenant = %tenant,
            page_number = request.page_number(),
            page_size = request.page_size()
        ),
        err
    )]
    async fn get_page(
        &self,
        tenant: &TenantId,
        request: PageRequest,
    ) -> Result<Page<Document<T>>, RepositoryError> {
        let limit = i64::from(request.page_size());
        let offset = i64::try_from(request.offset())?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let total_count = self.store.count_documents(&mut tx, T::collection()).await?;

        let rows = self
            .store
            .list_documents_page(&mut tx, T::collection(), limit, offset)
            .await?;

        tx.commit().await?;

        Ok(Page::new(
            into_documents(rows)?,
            u64::try_from(total_count)?,
            request,
        ))
    }
}

/// Tenant-scoped CRUD over one record type.
///
/// Every operation is a function of `(tenant, uuid)`. A record owned by a
/// different tenant behaves exactly like a missing one.
#[automock]
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// Retrieves all records of the tenant in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::StoreUnavailable`] when the store fails.
    async fn get_all(&self, tenant: &TenantId) -> Result<Vec<Document<T>>, RepositoryError>;

    /// Retrieve a single record.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the tenant has no record
    /// with this identifier.
    async fn get_by_id(
        &self,
        tenant: &TenantId,
        uuid: TypedUuid<T>,
    ) -> Result<Document<T>, RepositoryError>;

    /// Creates a record, generating its identifier when none is given.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Validation`] for an invalid payload and
    /// [`RepositoryError::AlreadyExists`] when the tenant already has a
    /// record with this identifier.
    async fn create(
        &self,
        tenant: &TenantId,
        document: NewDocument<T>,
    ) -> Result<Document<T>, RepositoryError>;

    /// Replaces a record's payload.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Validation`] for an invalid payload and
    /// [`RepositoryError::NotFound`] when the record is missing.
    async fn update(
        &self,
        tenant: &TenantId,
        uuid: TypedUuid<T>,
        data: T,
    ) -> Result<Document<T>, RepositoryError>;

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the record is missing.
    async fn delete(&self, tenant: &TenantId, uuid: TypedUuid<T>) -> Result<(), RepositoryError>;

    /// Counts the tenant's records.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::StoreUnavailable`] when the store fails.
    async fn count(&self, tenant: &TenantId) -> Result<u64, RepositoryError>;

    /// Retrieves one page of records in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::StoreUnavailable`] when the store fails.
    async fn get_page(
        &self,
        tenant: &TenantId,
        request: PageRequest,
    ) -> Result<Page<Document<T>>, RepositoryError>;
}
