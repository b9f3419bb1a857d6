//! Documents Store

use jiff::Timestamp;
use sqlx::{FromRow, Sqlite, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::TenantTransaction,
    documents::{
        errors::RepositoryError,
        records::{Document, Record},
    },
    tenants::TenantId,
    uuids::TypedUuid,
};

const LIST_DOCUMENTS_SQL: &str = include_str!("sql/list_documents.sql");
const LIST_DOCUMENTS_PAGE_SQL: &str = include_str!("sql/list_documents_page.sql");
const COUNT_DOCUMENTS_SQL: &str = include_str!("sql/count_documents.sql");
const GET_DOCUMENT_SQL: &str = include_str!("sql/get_document.sql");
const CREATE_DOCUMENT_SQL: &str = include_str!("sql/create_document.sql");
const UPDATE_DOCUMENT_SQL: &str = include_str!("sql/update_document.sql");
const DELETE_DOCUMENT_SQL: &str = include_str!("sql/delete_document.sql");

/// A raw `documents` row.
#[derive(Debug, FromRow)]
pub(crate) struct DocumentRow {
    uuid: Uuid,
    tenant: String,
    body: String,
    created_at: i64,
    updated_at: i64,
}

impl DocumentRow {
    pub(crate) fn into_document<T: Record>(self) -> Result<Document<T>, RepositoryError> {
        Ok(Document {
            uuid: TypedUuid::from_uuid(self.uuid),
            tenant: TenantId::new(self.tenant)?,
            created_at: Timestamp::from_microsecond(self.created_at)?,
            updated_at: Timestamp::from_microsecond(self.updated_at)?,
            data: serde_json::from_str(&self.body)?,
        })
    }
}

/// Statements over the `documents` table.
///
/// Every statement filters on the collection and on the tenant bound to the
/// transaction it runs in.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SqliteDocumentStore;

impl SqliteDocumentStore {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_documents(
        &self,
        tx: &mut TenantTransaction,
        collection: &str,
    ) -> Result<Vec<DocumentRow>, sqlx::Error> {
        let tenant = tx.tenant().as_str().to_owned();

        query_as::<Sqlite, DocumentRow>(LIST_DOCUMENTS_SQL)
            .bind(collection)
            .bind(tenant)
            .fetch_all(tx.connection())
            .await
    }

    pub(crate) async fn list_documents_page(
        &self,
        tx: &mut TenantTransaction,
        collection: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DocumentRow>, sqlx::Error> {
        let tenant = tx.tenant().as_str().to_owned();

        query_as::<Sqlite, DocumentRow>(LIST_DOCUMENTS_PAGE_SQL)
            .bind(collection)
            .bind(tenant)
            .bind(limit)
            .bind(offset)
            .fetch_all(tx.connection())
            .await
    }

    pub(crate) async fn count_documents(
        &self,
        tx: &mut TenantTransaction,
        collection: &str,
    ) -> Result<i64, sqlx::Error> {
        let tenant = tx.tenant().as_str().to_owned();

        query_scalar::<Sqlite, i64>(COUNT_DOCUMENTS_SQL)
            .bind(collection)
            .bind(tenant)
            .fetch_one(tx.connection())
            .await
    }

    pub(crate) async fn get_document(
        &self,
        tx: &mut TenantTransaction,
        collection: &str,
        uuid: Uuid,
    ) -> Result<DocumentRow, sqlx::Error> {
        let tenant = tx.tenant().as_str().to_owned();

        query_as::<Sqlite, DocumentRow>(GET_DOCUMENT_SQL)
            .bind(collection)
            .bind(tenant)
            .bind(uuid)
            .fetch_one(tx.connection())
            .await
    }

    pub(crate) async fn create_document(
        &self,
        tx: &mut TenantTransaction,
        collection: &str,
        uuid: Uuid,
        body: String,
        now: Timestamp,
    ) -> Result<DocumentRow, sqlx::Error> {
        let tenant = tx.tenant().as_str().to_owned();

        query_as::<Sqlite, DocumentRow>(CREATE_DOCUMENT_SQL)
            .bind(collection)
            .bind(tenant)
            .bind(uuid)
            .bind(body)
            .bind(now.as_microsecond())
            .fetch_one(tx.connection())
            .await
    }

    pub(crate) async fn update_document(
        &self,
        tx: &mut TenantTransaction,
        collection: &str,
        uuid: Uuid,
        body: String,
        now: Timestamp,
    ) -> Result<DocumentRow, sqlx::Error> {
        let tenant = tx.tenant().as_str().to_owned();

        query_as::<Sqlite, DocumentRow>(UPDATE_DOCUMENT_SQL)
            .bind(collection)
            .bind(tenant)
            .bind(uuid)
            .bind(body)
            .bind(now.as_microsecond())
            .fetch_one(tx.connection())
            .await
    }

    pub(crate) async fn delete_document(
        &self,
        tx: &mut TenantTransaction,
        collection: &str,
        uuid: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let tenant = tx.tenant().as_str().to_owned();

        let rows_affected = query(DELETE_DOCUMENT_SQL)
            .bind(collection)
            .bind(tenant)
            .bind(uuid)
            .execute(tx.connection())
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
