//! Default data seeding.
//!
//! Seeding runs once per process start. Each descriptor carries a fixed
//! identifier, so the system tenant's existing records say exactly which
//! defaults are already present. A store holding every default is left
//! untouched; a run interrupted part way is completed by the next one.
//! When two processes seed the same store at once, the loser of each insert
//! sees [`RepositoryError::AlreadyExists`] and counts the record as present.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    documents::{NewDocument, Record, Repository, RepositoryError},
    tenants::TenantId,
    uuids::TypedUuid,
};

/// Record types that can be seeded as system-owned defaults.
pub trait SystemDefault: Record {
    /// Flag the payload as a system default.
    fn mark_system_default(&mut self);
}

/// Template for a system-owned default record.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedDescriptor<T> {
    /// Stable name used in logs and errors.
    pub key: &'static str,

    /// Fixed identifier shared by every process seeding this record.
    pub uuid: TypedUuid<T>,

    /// Payload inserted under the system tenant.
    pub data: T,
}

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Records written by this run.
    pub inserted: usize,

    /// Records that already existed, or that another process wrote first.
    pub already_present: usize,

    /// Set when every default was present before the run.
    pub skipped: bool,
}

/// Seeding failures. All are fatal to startup.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Existing system records could not be read.
    #[error("failed to check existing `{collection}` defaults")]
    Check {
        /// Collection being seeded.
        collection: &'static str,
        /// Underlying repository failure.
        #[source]
        source: RepositoryError,
    },

    /// A default could not be written.
    #[error("failed to seed `{collection}` default `{key}`")]
    Insert {
        /// Collection being seeded.
        collection: &'static str,
        /// Descriptor that failed.
        key: &'static str,
        /// Underlying repository failure.
        #[source]
        source: RepositoryError,
    },
}

/// Ensure the given defaults exist under the system tenant.
///
/// # Errors
///
/// Returns an error when the existence check fails or when an insert fails
/// for any reason other than the record already existing.
#[tracing::instrument(
    name = "seeding.seed_defaults",
    skip_all,
    fields(collection = T::collection(), descriptors = descriptors.len()),
    err
)]
pub async fn seed_defaults<T, R>(
    repository: &R,
    descriptors: &[SeedDescriptor<T>],
) -> Result<SeedReport, SeedError>
where
    T: SystemDefault,
    R: Repository<T> + ?Sized,
{
    let system = TenantId::system();

    let existing: HashSet<TypedUuid<T>> = repository
        .get_all(&system)
        .await
        .map_err(|source| SeedError::Check {
            collection: T::collection(),
            source,
        })?
        .into_iter()
        .map(|document| document.uuid)
        .collect();

    let mut report = SeedReport::default();

    let missing: Vec<_> = descriptors
        .iter()
        .filter(|descriptor| !existing.contains(&descriptor.uuid))
        .collect();

    report.already_present = descriptors.len() - missing.len();

    if missing.is_empty() {
        debug!(existing = existing.len(), "defaults already seeded");

        report.skipped = true;

        return Ok(report);
    }

    for descriptor in missing {
        let mut data = descriptor.data.clone();

        data.mark_system_default();

        match repository
            .create(&system, NewDocument::with_uuid(descriptor.uuid, data))
            .await
        {
            Ok(_) => report.inserted += 1,
            Err(RepositoryError::AlreadyExists) => {
                debug!(key = descriptor.key, "default inserted concurrently");

                report.already_present += 1;
            }
            Err(source) => {
                return Err(SeedError::Insert {
                    collection: T::collection(),
                    key: descriptor.key,
                    source,
                });
            }
        }
    }

    info!(
        inserted = report.inserted,
        already_present = report.already_present,
        "seeded defaults"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::{
        documents::{Document, MockRepository, SqliteRepository},
        domain::payment_methods::{
            PaymentMethod, PaymentMethodUuid, default_payment_methods,
            seeds::{BANK_TRANSFER_UUID, CASH_UUID, CHECK_UUID},
        },
        test::TestDb,
    };

    use super::*;

    fn stored(descriptor: &SeedDescriptor<PaymentMethod>) -> Document<PaymentMethod> {
        Document {
            uuid: descriptor.uuid,
            tenant: TenantId::system(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            data: descriptor.data.clone(),
        }
    }

    fn tenant_method(name: &str) -> PaymentMethod {
        PaymentMethod {
            name: name.to_string(),
            description: String::new(),
            is_system_default: false,
        }
    }

    #[tokio::test]
    async fn seeding_empty_store_inserts_three_defaults() -> TestResult {
        let test_db = TestDb::new().await;
        let repository = SqliteRepository::<PaymentMethod>::new(test_db.db());

        let report = seed_defaults(&repository, &default_payment_methods()).await?;

        assert_eq!(
            report,
            SeedReport {
                inserted: 3,
                already_present: 0,
                skipped: false
            }
        );

        let methods = repository.get_all(&TenantId::system()).await?;

        let names: Vec<_> = methods.iter().map(|m| m.data.name.as_str()).collect();

        assert_eq!(names, ["Bank Transfer", "Cash", "Check"]);
        assert!(methods.iter().all(|m| m.tenant.is_system()));
        assert!(methods.iter().all(|m| m.data.is_system_default));

        let uuids: Vec<PaymentMethodUuid> = methods.iter().map(|m| m.uuid).collect();

        assert_eq!(uuids, [BANK_TRANSFER_UUID, CASH_UUID, CHECK_UUID]);

        Ok(())
    }

    #[tokio::test]
    async fn seeding_twice_inserts_nothing_the_second_time() -> TestResult {
        let test_db = TestDb::new().await;
        let repository = SqliteRepository::<PaymentMethod>::new(test_db.db());

        seed_defaults(&repository, &default_payment_methods()).await?;

        let second = seed_defaults(&repository, &default_payment_methods()).await?;

        assert!(second.skipped);
        assert_eq!(second.inserted, 0);
        assert_eq!(second.already_present, 3);
        assert_eq!(repository.count(&TenantId::system()).await?, 3);

        Ok(())
    }

    #[tokio::test]
    async fn seeding_ignores_other_tenants_records() -> TestResult {
        let test_db = TestDb::new().await;
        let repository = SqliteRepository::<PaymentMethod>::new(test_db.db());
        let tenant = TenantId::new("acme")?;

        repository
            .create(&tenant, NewDocument::new(tenant_method("Standing Order")))
            .await?;

        let report = seed_defaults(&repository, &default_payment_methods()).await?;

        assert_eq!(report.inserted, 3);
        assert_eq!(repository.count(&tenant).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn tenant_records_reusing_default_ids_do_not_block_seeding() -> TestResult {
        let test_db = TestDb::new().await;
        let repository = SqliteRepository::<PaymentMethod>::new(test_db.db());
        let acme = TenantId::new("acme")?;
        let other = TenantId::new("other")?;

        for tenant in [&acme, &other] {
            repository
                .create(tenant, NewDocument::with_uuid(CASH_UUID, tenant_method("Till")))
                .await?;
        }

        let report = seed_defaults(&repository, &default_payment_methods()).await?;

        assert_eq!(report.inserted, 3);
        assert_eq!(repository.count(&TenantId::system()).await?, 3);

        let cash = repository.get_by_id(&TenantId::system(), CASH_UUID).await?;

        assert_eq!(cash.data.name, "Cash");

        let till = repository.get_by_id(&acme, CASH_UUID).await?;

        assert_eq!(till.data.name, "Till");
        assert!(!till.data.is_system_default);

        Ok(())
    }

    #[tokio::test]
    async fn partially_seeded_store_is_completed() -> TestResult {
        let test_db = TestDb::new().await;
        let repository = SqliteRepository::<PaymentMethod>::new(test_db.db());

        repository
            .create(
                &TenantId::system(),
                NewDocument::with_uuid(
                    BANK_TRANSFER_UUID,
                    PaymentMethod {
                        name: "Bank Transfer".to_string(),
                        description: String::new(),
                        is_system_default: true,
                    },
                ),
            )
            .await?;

        let report = seed_defaults(&repository, &default_payment_methods()).await?;

        assert_eq!(
            report,
            SeedReport {
                inserted: 2,
                already_present: 1,
                skipped: false
            }
        );

        let uuids: Vec<_> = repository
            .get_all(&TenantId::system())
            .await?
            .into_iter()
            .map(|m| m.uuid)
            .collect();

        assert_eq!(uuids, [BANK_TRANSFER_UUID, CASH_UUID, CHECK_UUID]);

        Ok(())
    }

    #[tokio::test]
    async fn seeded_records_are_always_flagged_as_defaults() -> TestResult {
        let test_db = TestDb::new().await;
        let repository = SqliteRepository::<PaymentMethod>::new(test_db.db());

        let descriptors = [SeedDescriptor {
            key: "unflagged",
            uuid: PaymentMethodUuid::new(),
            data: tenant_method("Unflagged"),
        }];

        seed_defaults(&repository, &descriptors).await?;

        let methods = repository.get_all(&TenantId::system()).await?;

        assert_eq!(methods.len(), 1);
        assert!(methods.iter().all(|m| m.data.is_system_default));

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_seeding_never_duplicates() -> TestResult {
        let test_db = TestDb::new().await;
        let first = SqliteRepository::<PaymentMethod>::new(test_db.db());
        let second = first.clone();
        let descriptors = default_payment_methods();

        let (a, b) = tokio::join!(
            seed_defaults(&first, &descriptors),
            seed_defaults(&second, &descriptors)
        );

        let (a, b) = (a?, b?);

        assert_eq!(a.inserted + b.inserted, 3);
        assert_eq!(first.count(&TenantId::system()).await?, 3);

        Ok(())
    }

    #[tokio::test]
    async fn losing_a_race_counts_as_already_present() -> TestResult {
        let mut repository = MockRepository::<PaymentMethod>::new();

        repository
            .expect_get_all()
            .once()
            .withf(|tenant| tenant.is_system())
            .return_once(|_| Ok(vec![]));

        repository
            .expect_create()
            .times(3)
            .withf(|tenant, document| tenant.is_system() && document.uuid.is_some())
            .returning(|_, document| {
                if document.uuid == Some(CASH_UUID) {
                    Err(RepositoryError::AlreadyExists)
                } else {
                    Ok(Document {
                        uuid: document.uuid.unwrap_or_default(),
                        tenant: TenantId::system(),
                        created_at: Timestamp::UNIX_EPOCH,
                        updated_at: Timestamp::UNIX_EPOCH,
                        data: document.data,
                    })
                }
            });

        let report = seed_defaults(&repository, &default_payment_methods()).await?;

        assert_eq!(
            report,
            SeedReport {
                inserted: 2,
                already_present: 1,
                skipped: false
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn fully_seeded_store_skips_inserts() -> TestResult {
        let descriptors = default_payment_methods();
        let existing = descriptors.iter().map(stored).collect::<Vec<_>>();

        let mut repository = MockRepository::<PaymentMethod>::new();

        repository
            .expect_get_all()
            .once()
            .return_once(move |_| Ok(existing));

        repository.expect_create().never();

        let report = seed_defaults(&repository, &descriptors).await?;

        assert!(report.skipped);

        Ok(())
    }

    #[tokio::test]
    async fn only_missing_defaults_are_created() -> TestResult {
        let descriptors = default_payment_methods();
        let existing = descriptors.iter().map(stored).take(1).collect::<Vec<_>>();

        let mut repository = MockRepository::<PaymentMethod>::new();

        repository
            .expect_get_all()
            .once()
            .return_once(move |_| Ok(existing));

        repository
            .expect_create()
            .times(2)
            .withf(|_, document| document.uuid != Some(BANK_TRANSFER_UUID))
            .returning(|_, document| {
                Ok(Document {
                    uuid: document.uuid.unwrap_or_default(),
                    tenant: TenantId::system(),
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                    data: document.data,
                })
            });

        let report = seed_defaults(&repository, &descriptors).await?;

        assert_eq!(report.inserted, 2);
        assert!(!report.skipped);

        Ok(())
    }

    #[tokio::test]
    async fn unavailable_store_fails_the_check() {
        let mut repository = MockRepository::<PaymentMethod>::new();

        repository
            .expect_get_all()
            .once()
            .return_once(|_| Err(RepositoryError::StoreUnavailable(sqlx::Error::PoolTimedOut)));

        repository.expect_create().never();

        let result = seed_defaults(&repository, &default_payment_methods()).await;

        assert!(
            matches!(
                result,
                Err(SeedError::Check {
                    collection: "payment_methods",
                    ..
                })
            ),
            "expected Check error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn insert_failure_aborts_seeding() {
        let mut repository = MockRepository::<PaymentMethod>::new();

        repository.expect_get_all().return_once(|_| Ok(vec![]));

        repository
            .expect_create()
            .once()
            .return_once(|_, _| Err(RepositoryError::StoreUnavailable(sqlx::Error::PoolClosed)));

        let result = seed_defaults(&repository, &default_payment_methods()).await;

        assert!(
            matches!(
                result,
                Err(SeedError::Insert {
                    key: "bank-transfer",
                    ..
                })
            ),
            "expected Insert error, got {result:?}"
        );
    }
}
