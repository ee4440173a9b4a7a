//! Crop status survey repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::beneficiary::Entity as BeneficiaryEntity;
use super::entities::crop_status_record::{
    self, encode_pictures, ActiveModel, Entity as CropStatusEntity,
};
use super::WithOwner;
use crate::domain::{Beneficiary, CropStatusData, CropStatusRecord};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CropStatusRepository: Send + Sync {
    /// Newest first, joined with the owning beneficiary
    async fn list(&self, beneficiary_id: Option<String>)
        -> AppResult<Vec<WithOwner<CropStatusRecord>>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<WithOwner<CropStatusRecord>>>;

    async fn create(&self, data: CropStatusData) -> AppResult<CropStatusRecord>;

    async fn update(&self, id: i32, data: CropStatusData) -> AppResult<CropStatusRecord>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct CropStatusStore {
    db: DatabaseConnection,
}

impl CropStatusStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn apply_data(active: &mut ActiveModel, data: CropStatusData) {
    active.beneficiary_id = Set(data.beneficiary_id);
    active.survey_date = Set(data.survey_date);
    active.surveyor = Set(data.surveyor);
    active.alive_crops = Set(data.alive_crops);
    active.dead_crops = Set(data.dead_crops);
    active.plot = Set(data.plot);
    active.pictures = Set(encode_pictures(&data.pictures));
}

#[async_trait]
impl CropStatusRepository for CropStatusStore {
    async fn list(
        &self,
        beneficiary_id: Option<String>,
    ) -> AppResult<Vec<WithOwner<CropStatusRecord>>> {
        let mut query = CropStatusEntity::find();
        if let Some(owner) = beneficiary_id {
            query = query.filter(crop_status_record::Column::BeneficiaryId.eq(owner));
        }

        let rows = query
            .find_also_related(BeneficiaryEntity)
            .order_by_desc(crop_status_record::Column::CreatedAt)
            .order_by_desc(crop_status_record::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(record, owner)| (record.into(), owner.map(Beneficiary::from)))
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<WithOwner<CropStatusRecord>>> {
        let row = CropStatusEntity::find_by_id(id)
            .find_also_related(BeneficiaryEntity)
            .one(&self.db)
            .await?;

        Ok(row.map(|(record, owner)| (record.into(), owner.map(Beneficiary::from))))
    }

    async fn create(&self, data: CropStatusData) -> AppResult<CropStatusRecord> {
        let now = chrono::Utc::now();
        let mut active = ActiveModel {
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply_data(&mut active, data);

        let model = active.insert(&self.db).await?;
        Ok(CropStatusRecord::from(model))
    }

    async fn update(&self, id: i32, data: CropStatusData) -> AppResult<CropStatusRecord> {
        let existing = CropStatusEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Crop status record"))?;

        let mut active: ActiveModel = existing.into();
        apply_data(&mut active, data);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(CropStatusRecord::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = CropStatusEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Crop status record"));
        }
        Ok(())
    }
}
