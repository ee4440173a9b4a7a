//! Crop status survey database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::CropStatusRecord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "crop_status_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub beneficiary_id: String,
    pub survey_date: Date,
    pub surveyor: String,
    pub alive_crops: i32,
    pub dead_crops: i32,
    pub plot: Option<String>,
    /// JSON array of stored filenames
    #[sea_orm(column_type = "Text")]
    pub pictures: String,
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

impl Model {
    /// Decoded picture list; a corrupt column reads as no pictures.
    pub fn picture_list(&self) -> Vec<String> {
        decode_pictures(self.id, &self.pictures)
    }
}

pub(crate) fn decode_pictures(id: i32, raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(record_id = id, error = %e, "Unreadable crop status pictures");
        Vec::new()
    })
}

pub(crate) fn encode_pictures(pictures: &[String]) -> String {
    serde_json::to_string(pictures).unwrap_or_else(|_| "[]".to_string())
}

impl From<Model> for CropStatusRecord {
    fn from(model: Model) -> Self {
        let pictures = model.picture_list();
        CropStatusRecord {
            id: model.id,
            beneficiary_id: model.beneficiary_id,
            survey_date: model.survey_date,
            surveyor: model.surveyor,
            alive_crops: model.alive_crops,
            dead_crops: model.dead_crops,
            plot: model.plot,
            pictures,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
