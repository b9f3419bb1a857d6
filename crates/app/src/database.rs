//! Database connection management

use std::{str::FromStr, time::Duration};

use sqlx::{
    Sqlite, SqliteConnection, SqlitePool, Transaction,
    migrate::{MigrateError, Migrator},
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::info;

use crate::{config::DatabaseConfig, tenants::TenantId};

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared connection pool handle.
#[derive(Debug, Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Wrap an existing pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Begin a transaction bound to a tenant.
    ///
    /// Document statements take their tenant from the returned transaction,
    /// never from a free-standing argument.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin_tenant_transaction(
        &self,
        tenant: &TenantId,
    ) -> Result<TenantTransaction, sqlx::Error> {
        let tx = self.pool.begin().await?;

        Ok(TenantTransaction {
            tx,
            tenant: tenant.clone(),
        })
    }
}

/// A transaction scoped to exactly one tenant.
#[derive(Debug)]
pub struct TenantTransaction {
    tx: Transaction<'static, Sqlite>,
    tenant: TenantId,
}

impl TenantTransaction {
    /// Tenant every statement in this transaction is scoped to.
    #[must_use]
    pub fn tenant(&self) -> &TenantId {
        &self.tenant
    }

    pub(crate) fn connection(&mut self) -> &mut SqliteConnection {
        &mut *self.tx
    }

    /// Commit the transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when the commit fails.
    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.tx.commit().await
    }
}

/// Connect to `SQLite`.
///
/// In-memory URLs get a single long-lived connection so every caller sees
/// the same database.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the connection cannot be
/// established.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    let pool_options = if is_in_memory(&config.database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections)
    };

    let pool = pool_options.connect_with(options).await?;

    info!(
        in_memory = is_in_memory(&config.database_url),
        "connected to database"
    );

    Ok(pool)
}

/// Apply pending migrations.
///
/// # Errors
///
/// Returns an error when a migration fails to apply.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;

    info!("database migrations applied");

    Ok(())
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file:rentals?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://rentals.db"));
    }

    #[tokio::test]
    async fn in_memory_connection_applies_migrations() {
        let pool = connect(&DatabaseConfig::in_memory())
            .await
            .expect("in-memory connection should succeed");

        migrate(&pool).await.expect("migrations should apply");

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'documents'",
        )
        .fetch_one(&pool)
        .await
        .expect("schema query should succeed");

        assert_eq!(tables, 1);
    }

    #[tokio::test]
    async fn tenant_transaction_carries_its_tenant() {
        let pool = connect(&DatabaseConfig::in_memory())
            .await
            .expect("in-memory connection should succeed");
        let db = Db::new(pool);
        let tenant = TenantId::new("acme").expect("tenant should parse");

        let tx = db
            .begin_tenant_transaction(&tenant)
            .await
            .expect("transaction should begin");

        assert_eq!(tx.tenant(), &tenant);

        tx.commit().await.expect("commit should succeed");
    }
}
