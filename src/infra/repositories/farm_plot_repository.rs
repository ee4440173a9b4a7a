//! Farm plot repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::beneficiary::Entity as BeneficiaryEntity;
use super::entities::farm_plot::{self, encode_coordinates, ActiveModel, Entity as FarmPlotEntity};
use super::WithOwner;
use crate::domain::{Beneficiary, FarmPlot, FarmPlotData};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FarmPlotRepository: Send + Sync {
    /// Newest first, joined with the owning beneficiary
    async fn list(&self, beneficiary_id: Option<String>) -> AppResult<Vec<WithOwner<FarmPlot>>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<WithOwner<FarmPlot>>>;

    async fn create(&self, data: FarmPlotData) -> AppResult<FarmPlot>;

    async fn update(&self, id: i32, data: FarmPlotData) -> AppResult<FarmPlot>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct FarmPlotStore {
    db: DatabaseConnection,
}

impl FarmPlotStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn apply_data(active: &mut ActiveModel, data: FarmPlotData) {
    active.beneficiary_id = Set(data.beneficiary_id);
    active.name = Set(data.name);
    active.color = Set(data.color);
    active.coordinates = Set(encode_coordinates(&data.coordinates));
}

#[async_trait]
impl FarmPlotRepository for FarmPlotStore {
    async fn list(&self, beneficiary_id: Option<String>) -> AppResult<Vec<WithOwner<FarmPlot>>> {
        let mut query = FarmPlotEntity::find();
        if let Some(owner) = beneficiary_id {
            query = query.filter(farm_plot::Column::BeneficiaryId.eq(owner));
        }

        let rows = query
            .find_also_related(BeneficiaryEntity)
            .order_by_desc(farm_plot::Column::CreatedAt)
            .order_by_desc(farm_plot::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(plot, owner)| (plot.into(), owner.map(Beneficiary::from)))
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<WithOwner<FarmPlot>>> {
        let row = FarmPlotEntity::find_by_id(id)
            .find_also_related(BeneficiaryEntity)
            .one(&self.db)
            .await?;

        Ok(row.map(|(plot, owner)| (plot.into(), owner.map(Beneficiary::from))))
    }

    async fn create(&self, data: FarmPlotData) -> AppResult<FarmPlot> {
        let now = chrono::Utc::now();
        let mut active = ActiveModel {
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply_data(&mut active, data);

        let model = active.insert(&self.db).await?;
        Ok(FarmPlot::from(model))
    }

    async fn update(&self, id: i32, data: FarmPlotData) -> AppResult<FarmPlot> {
        let existing = FarmPlotEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Farm plot"))?;

        let mut active: ActiveModel = existing.into();
        apply_data(&mut active, data);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(FarmPlot::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = FarmPlotEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Farm plot"));
        }
        Ok(())
    }
}
