//! Beneficiary database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Beneficiary, Gender};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "beneficiaries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub beneficiary_id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub name_extension: Option<String>,
    pub gender: String,
    pub birth_date: Option<Date>,
    pub phone: Option<String>,
    pub province: String,
    pub municipality: String,
    pub barangay: String,
    pub street: Option<String>,
    pub picture: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::seedling_record::Entity")]
    SeedlingRecords,
    #[sea_orm(has_many = "super::crop_status_record::Entity")]
    CropStatusRecords,
    #[sea_orm(has_many = "super::farm_plot::Entity")]
    FarmPlots,
}

impl Related<super::seedling_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeedlingRecords.def()
    }
}

impl Related<super::crop_status_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CropStatusRecords.def()
    }
}

impl Related<super::farm_plot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FarmPlots.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Beneficiary {
    fn from(model: Model) -> Self {
        let gender = Gender::try_from(model.gender.as_str()).unwrap_or_else(|_| {
            tracing::warn!(
                beneficiary_id = %model.beneficiary_id,
                gender = %model.gender,
                "Unrecognized stored gender"
            );
            Gender::Other
        });

        Beneficiary {
            id: model.id,
            beneficiary_id: model.beneficiary_id,
            first_name: model.first_name,
            middle_name: model.middle_name,
            last_name: model.last_name,
            name_extension: model.name_extension,
            gender,
            birth_date: model.birth_date,
            phone: model.phone,
            province: model.province,
            municipality: model.municipality,
            barangay: model.barangay,
            street: model.street,
            picture: model.picture,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
