//! Aggregate queries for the dashboard.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, FromQueryResult, PaginatorTrait,
    QuerySelect,
};

use super::entities::beneficiary::{self, Entity as BeneficiaryEntity};
use super::entities::crop_status_record::Entity as CropStatusEntity;
use super::entities::farm_plot::Entity as FarmPlotEntity;
use super::entities::seedling_record::{self, Entity as SeedlingEntity};
use crate::domain::{GenderCount, MunicipalityCount, Totals};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait StatisticsRepository: Send + Sync {
    /// Row counts of beneficiaries, farm plots and surveys
    async fn counts(&self) -> AppResult<(i64, i64, i64)>;

    /// Seedlings received, planted and hectares
    async fn seedling_sums(&self) -> AppResult<(i64, i64, f64)>;

    /// Alive and dead crops across all surveys
    async fn crop_sums(&self) -> AppResult<(i64, i64)>;

    async fn gender_breakdown(&self) -> AppResult<Vec<GenderCount>>;

    async fn municipality_breakdown(&self) -> AppResult<Vec<MunicipalityCount>>;
}

pub struct StatisticsStore {
    db: DatabaseConnection,
}

impl StatisticsStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// SUM over an integer column as a 64-bit integer (MySQL returns DECIMAL).
    fn integer_sum(&self, column: &str) -> SimpleExpr {
        match self.db.get_database_backend() {
            DbBackend::MySql => Expr::cust(format!("CAST(SUM({}) AS SIGNED)", column)),
            DbBackend::Postgres => Expr::cust(format!("CAST(SUM({}) AS BIGINT)", column)),
            DbBackend::Sqlite => Expr::cust(format!("SUM({})", column)),
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct SeedlingSums {
    received: Option<i64>,
    planted: Option<i64>,
    hectares: Option<f64>,
}

#[derive(Debug, FromQueryResult)]
struct CropSums {
    alive: Option<i64>,
    dead: Option<i64>,
}

#[derive(Debug, FromQueryResult)]
struct GroupCount {
    label: String,
    count: i64,
}

#[async_trait]
impl StatisticsRepository for StatisticsStore {
    async fn counts(&self) -> AppResult<(i64, i64, i64)> {
        let (beneficiaries, plots, surveys) = tokio::try_join!(
            BeneficiaryEntity::find().count(&self.db),
            FarmPlotEntity::find().count(&self.db),
            CropStatusEntity::find().count(&self.db),
        )?;
        Ok((beneficiaries as i64, plots as i64, surveys as i64))
    }

    async fn seedling_sums(&self) -> AppResult<(i64, i64, f64)> {
        let sums = SeedlingEntity::find()
            .select_only()
            .column_as(self.integer_sum("seedlings_received"), "received")
            .column_as(self.integer_sum("seedlings_planted"), "planted")
            .column_as(Expr::col(seedling_record::Column::Hectares).sum(), "hectares")
            .into_model::<SeedlingSums>()
            .one(&self.db)
            .await?;

        Ok(sums.map_or((0, 0, 0.0), |s| {
            (
                s.received.unwrap_or(0),
                s.planted.unwrap_or(0),
                s.hectares.unwrap_or(0.0),
            )
        }))
    }

    async fn crop_sums(&self) -> AppResult<(i64, i64)> {
        let sums = CropStatusEntity::find()
            .select_only()
            .column_as(self.integer_sum("alive_crops"), "alive")
            .column_as(self.integer_sum("dead_crops"), "dead")
            .into_model::<CropSums>()
            .one(&self.db)
            .await?;

        Ok(sums.map_or((0, 0), |s| (s.alive.unwrap_or(0), s.dead.unwrap_or(0))))
    }

    async fn gender_breakdown(&self) -> AppResult<Vec<GenderCount>> {
        let rows = BeneficiaryEntity::find()
            .select_only()
            .column_as(beneficiary::Column::Gender, "label")
            .column_as(Expr::col(beneficiary::Column::Id).count(), "count")
            .group_by(beneficiary::Column::Gender)
            .into_model::<GroupCount>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| GenderCount {
                gender: r.label,
                count: r.count,
            })
            .collect())
    }

    async fn municipality_breakdown(&self) -> AppResult<Vec<MunicipalityCount>> {
        let rows = BeneficiaryEntity::find()
            .select_only()
            .column_as(beneficiary::Column::Municipality, "label")
            .column_as(Expr::col(beneficiary::Column::Id).count(), "count")
            .group_by(beneficiary::Column::Municipality)
            .into_model::<GroupCount>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| MunicipalityCount {
                municipality: r.label,
                count: r.count,
            })
            .collect())
    }
}

/// Combine the separate aggregate reads into one [`Totals`].
pub fn totals_from(
    (beneficiaries, farm_plots, surveys): (i64, i64, i64),
    (seedlings_received, seedlings_planted, hectares): (i64, i64, f64),
    (alive_crops, dead_crops): (i64, i64),
) -> Totals {
    Totals {
        beneficiaries,
        farm_plots,
        surveys,
        seedlings_received,
        seedlings_planted,
        hectares,
        alive_crops,
        dead_crops,
    }
}
