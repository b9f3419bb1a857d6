//! App Context

use std::{fmt, sync::Arc};

use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::info;

use crate::{
    config::DatabaseConfig,
    database::{self, Db},
    documents::{Repository, SqliteRepository},
    domain::{
        attachments::Attachment,
        payment_methods::{PaymentMethod, default_payment_methods},
        payments::{DocumentPaymentsService, Payment, PaymentsService},
        properties::Property,
    },
    seeding::{SeedError, SeedReport, seed_defaults},
};

/// Startup failures. All are fatal.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The store could not be reached.
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    /// A schema migration failed to apply.
    #[error("failed to run database migrations")]
    Migrate(#[source] MigrateError),

    /// Default records could not be written.
    #[error("failed to seed default data")]
    Seed(#[from] SeedError),
}

/// Shared handles built once at startup.
#[derive(Clone)]
pub struct AppContext {
    /// Connection pool shared by every repository.
    pub db: Db,
    /// Property records.
    pub properties: Arc<dyn Repository<Property>>,
    /// Payment records.
    pub payments: Arc<dyn Repository<Payment>>,
    /// Payment method records, including system defaults.
    pub payment_methods: Arc<dyn Repository<PaymentMethod>>,
    /// Attachment metadata records.
    pub attachments: Arc<dyn Repository<Attachment>>,
    /// Payment recording with reference checks.
    pub payments_service: Arc<dyn PaymentsService>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from database configuration.
    ///
    /// Applies pending migrations and seeds the default payment methods
    /// before returning.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting, migrating or seeding fails.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(config)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        let context = Self::from_db(Db::new(pool));

        let report = context.seed().await?;

        info!(
            inserted = report.inserted,
            skipped = report.skipped,
            "application context ready"
        );

        Ok(context)
    }

    /// Build repositories over an already migrated database.
    #[must_use]
    pub fn from_db(db: Db) -> Self {
        let properties: Arc<dyn Repository<Property>> =
            Arc::new(SqliteRepository::new(db.clone()));
        let payments: Arc<dyn Repository<Payment>> = Arc::new(SqliteRepository::new(db.clone()));
        let payment_methods: Arc<dyn Repository<PaymentMethod>> =
            Arc::new(SqliteRepository::new(db.clone()));

        Self {
            attachments: Arc::new(SqliteRepository::new(db.clone())),
            payments_service: Arc::new(DocumentPaymentsService::new(
                Arc::clone(&payments),
                Arc::clone(&properties),
                Arc::clone(&payment_methods),
            )),
            db,
            properties,
            payments,
            payment_methods,
        }
    }

    /// Ensure system default records exist.
    ///
    /// # Errors
    ///
    /// Returns an error when seeding fails.
    pub async fn seed(&self) -> Result<SeedReport, SeedError> {
        seed_defaults(self.payment_methods.as_ref(), &default_payment_methods()).await
    }

    /// Close the connection pool.
    pub async fn close(&self) {
        self.db.pool().close().await;
    }
}
