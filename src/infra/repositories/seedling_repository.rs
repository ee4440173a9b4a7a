//! Seedling record repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::beneficiary::Entity as BeneficiaryEntity;
use super::entities::seedling_record::{self, ActiveModel, Entity as SeedlingEntity};
use super::WithOwner;
use crate::domain::{Beneficiary, SeedlingInput, SeedlingRecord};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SeedlingRepository: Send + Sync {
    /// Newest first, joined with the owning beneficiary
    async fn list(&self, beneficiary_id: Option<String>) -> AppResult<Vec<WithOwner<SeedlingRecord>>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<WithOwner<SeedlingRecord>>>;

    async fn create(&self, input: SeedlingInput) -> AppResult<SeedlingRecord>;

    async fn update(&self, id: i32, input: SeedlingInput) -> AppResult<SeedlingRecord>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct SeedlingStore {
    db: DatabaseConnection,
}

impl SeedlingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn apply_input(active: &mut ActiveModel, input: SeedlingInput) {
    active.beneficiary_id = Set(input.beneficiary_id);
    active.seedlings_received = Set(input.seedlings_received);
    active.date_received = Set(input.date_received);
    active.seedlings_planted = Set(input.seedlings_planted);
    active.hectares = Set(input.hectares);
    active.planting_start = Set(input.planting_start);
    active.planting_end = Set(input.planting_end);
    active.gps = Set(input.gps);
}

#[async_trait]
impl SeedlingRepository for SeedlingStore {
    async fn list(&self, beneficiary_id: Option<String>) -> AppResult<Vec<WithOwner<SeedlingRecord>>> {
        let mut query = SeedlingEntity::find();
        if let Some(owner) = beneficiary_id {
            query = query.filter(seedling_record::Column::BeneficiaryId.eq(owner));
        }

        let rows = query
            .find_also_related(BeneficiaryEntity)
            .order_by_desc(seedling_record::Column::CreatedAt)
            .order_by_desc(seedling_record::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(record, owner)| (record.into(), owner.map(Beneficiary::from)))
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<WithOwner<SeedlingRecord>>> {
        let row = SeedlingEntity::find_by_id(id)
            .find_also_related(BeneficiaryEntity)
            .one(&self.db)
            .await?;

        Ok(row.map(|(record, owner)| (record.into(), owner.map(Beneficiary::from))))
    }

    async fn create(&self, input: SeedlingInput) -> AppResult<SeedlingRecord> {
        let now = chrono::Utc::now();
        let mut active = ActiveModel {
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply_input(&mut active, input);

        let model = active.insert(&self.db).await?;
        Ok(SeedlingRecord::from(model))
    }

    async fn update(&self, id: i32, input: SeedlingInput) -> AppResult<SeedlingRecord> {
        let existing = SeedlingEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Seedling record"))?;

        let mut active: ActiveModel = existing.into();
        apply_input(&mut active, input);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(SeedlingRecord::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = SeedlingEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Seedling record"));
        }
        Ok(())
    }
}
