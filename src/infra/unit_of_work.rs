//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and owns the transaction lifecycle.
//! Beneficiary deletion is the one multi-statement write; it runs through
//! [`TransactionContext`] so the dependents and the row go together.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend,
    EntityTrait, IsolationLevel, QueryFilter, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::entities::{beneficiary, crop_status_record, farm_plot, seedling_record};
use super::repositories::{
    AdminRepository, AdminStore, BeneficiaryRepository, BeneficiaryStore, CropStatusRepository,
    CropStatusStore, FarmPlotRepository, FarmPlotStore, SeedlingRepository, SeedlingStore,
    StatisticsRepository, StatisticsStore,
};
use crate::domain::Beneficiary;
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction management.
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, mock the repositories it hands out.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn admins(&self) -> Arc<dyn AdminRepository>;

    fn beneficiaries(&self) -> Arc<dyn BeneficiaryRepository>;

    fn seedlings(&self) -> Arc<dyn SeedlingRepository>;

    fn crop_statuses(&self) -> Arc<dyn CropStatusRepository>;

    fn farm_plots(&self) -> Arc<dyn FarmPlotRepository>;

    fn statistics(&self) -> Arc<dyn StatisticsRepository>;

    /// Execute a closure within a ReadCommitted transaction.
    ///
    /// Committed on success, rolled back on error with the original error returned.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// Everything done through this context commits or rolls back together.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn beneficiaries(&self) -> TxBeneficiaryRepository<'_> {
        TxBeneficiaryRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    admin_repo: Arc<AdminStore>,
    beneficiary_repo: Arc<BeneficiaryStore>,
    seedling_repo: Arc<SeedlingStore>,
    crop_status_repo: Arc<CropStatusStore>,
    farm_plot_repo: Arc<FarmPlotStore>,
    statistics_repo: Arc<StatisticsStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            admin_repo: Arc::new(AdminStore::new(db.clone())),
            beneficiary_repo: Arc::new(BeneficiaryStore::new(db.clone())),
            seedling_repo: Arc::new(SeedlingStore::new(db.clone())),
            crop_status_repo: Arc::new(CropStatusStore::new(db.clone())),
            farm_plot_repo: Arc::new(FarmPlotStore::new(db.clone())),
            statistics_repo: Arc::new(StatisticsStore::new(db.clone())),
            db,
        }
    }

    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // SQLite has no per-transaction isolation levels
        let txn = match self.db.get_database_backend() {
            DbBackend::Sqlite => self.db.begin().await?,
            _ => {
                self.db
                    .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
                    .await?
            }
        };

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn admins(&self) -> Arc<dyn AdminRepository> {
        self.admin_repo.clone()
    }

    fn beneficiaries(&self) -> Arc<dyn BeneficiaryRepository> {
        self.beneficiary_repo.clone()
    }

    fn seedlings(&self) -> Arc<dyn SeedlingRepository> {
        self.seedling_repo.clone()
    }

    fn crop_statuses(&self) -> Arc<dyn CropStatusRepository> {
        self.crop_status_repo.clone()
    }

    fn farm_plots(&self) -> Arc<dyn FarmPlotRepository> {
        self.farm_plot_repo.clone()
    }

    fn statistics(&self) -> Arc<dyn StatisticsRepository> {
        self.statistics_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }
}

/// Rows removed alongside a beneficiary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovedDependents {
    pub seedlings: u64,
    pub surveys: u64,
    pub farm_plots: u64,
    /// Image filenames of the removed surveys
    pub survey_pictures: Vec<String>,
}

/// Transaction-aware beneficiary repository.
///
/// Executes all operations within the borrowed transaction.
pub struct TxBeneficiaryRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxBeneficiaryRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Beneficiary>> {
        let result = beneficiary::Entity::find_by_id(id).one(self.txn).await?;
        Ok(result.map(Beneficiary::from))
    }

    /// Delete every record that references `beneficiary_id`.
    pub async fn delete_dependents(&self, beneficiary_id: &str) -> AppResult<RemovedDependents> {
        let surveys = crop_status_record::Entity::find()
            .filter(crop_status_record::Column::BeneficiaryId.eq(beneficiary_id))
            .all(self.txn)
            .await?;
        let survey_pictures = surveys
            .iter()
            .flat_map(crop_status_record::Model::picture_list)
            .collect();

        let seedlings = seedling_record::Entity::delete_many()
            .filter(seedling_record::Column::BeneficiaryId.eq(beneficiary_id))
            .exec(self.txn)
            .await?;
        let removed_surveys = crop_status_record::Entity::delete_many()
            .filter(crop_status_record::Column::BeneficiaryId.eq(beneficiary_id))
            .exec(self.txn)
            .await?;
        let plots = farm_plot::Entity::delete_many()
            .filter(farm_plot::Column::BeneficiaryId.eq(beneficiary_id))
            .exec(self.txn)
            .await?;

        Ok(RemovedDependents {
            seedlings: seedlings.rows_affected,
            surveys: removed_surveys.rows_affected,
            farm_plots: plots.rows_affected,
            survey_pictures,
        })
    }

    /// Hard delete the beneficiary row.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = beneficiary::Entity::delete_by_id(id).exec(self.txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Beneficiary"));
        }
        Ok(())
    }
}

/// Shorthand for running a block inside [`UnitOfWork::transaction`].
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
