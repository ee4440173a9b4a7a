//! Farm plot database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Coordinate, FarmPlot};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "farm_plots")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub beneficiary_id: String,
    pub name: String,
    pub color: String,
    /// JSON array of `{lat, lng}`
    #[sea_orm(column_type = "Text")]
    pub coordinates: String,
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

pub(crate) fn encode_coordinates(coordinates: &[Coordinate]) -> String {
    serde_json::to_string(coordinates).unwrap_or_else(|_| "[]".to_string())
}

impl From<Model> for FarmPlot {
    fn from(model: Model) -> Self {
        let coordinates = serde_json::from_str(&model.coordinates).unwrap_or_else(|e| {
            tracing::warn!(plot_id = model.id, error = %e, "Unreadable farm plot coordinates");
            Vec::new()
        });

        FarmPlot {
            id: model.id,
            beneficiary_id: model.beneficiary_id,
            name: model.name,
            color: model.color,
            coordinates,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
