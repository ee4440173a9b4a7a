//! Seedling record database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::SeedlingRecord;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "seedling_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub beneficiary_id: String,
    pub seedlings_received: i32,
    pub date_received: Date,
    pub seedlings_planted: i32,
    pub hectares: f64,
    pub planting_start: Date,
    pub planting_end: Option<Date>,
    pub gps: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::beneficiary::Entity",
        from = "Column::BeneficiaryId",
        to = "super::beneficiary::Column::BeneficiaryId"
    )]
    Beneficiary,
}

impl Related<super::beneficiary::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Beneficiary.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SeedlingRecord {
    fn from(model: Model) -> Self {
        SeedlingRecord {
            id: model.id,
            beneficiary_id: model.beneficiary_id,
            seedlings_received: model.seedlings_received,
            date_received: model.date_received,
            seedlings_planted: model.seedlings_planted,
            hectares: model.hectares,
            planting_start: model.planting_start,
            planting_end: model.planting_end,
            gps: model.gps,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
