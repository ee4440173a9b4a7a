//! Farm plot boundaries drawn on the dashboard map.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::beneficiary::OwnerSummary;
use super::coordinates::Coordinate;
use crate::config::{DEFAULT_PLOT_COLOR, MIN_PLOT_VERTICES};
use crate::errors::{AppError, AppResult};
use crate::types::lenient;

/// Polygon boundary owned by a beneficiary
#[derive(Debug, Clone, PartialEq)]
pub struct FarmPlot {
    pub id: i32,
    pub beneficiary_id: String,
    pub name: String,
    pub color: String,
    pub coordinates: Vec<Coordinate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Check that a boundary has enough vertices and every vertex is in range.
pub fn ensure_boundary(coordinates: &[Coordinate]) -> AppResult<()> {
    if coordinates.len() < MIN_PLOT_VERTICES {
        return Err(AppError::validation(format!(
            "A farm plot needs at least {} coordinates",
            MIN_PLOT_VERTICES
        )));
    }
    coordinates.iter().try_for_each(Coordinate::validate)
}

/// Create/update payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FarmPlotInput {
    #[serde(deserialize_with = "lenient::text")]
    #[validate(length(min = 1, max = 20, message = "Beneficiary ID is required"))]
    #[schema(example = "JD001")]
    pub beneficiary_id: String,
    #[serde(deserialize_with = "lenient::text")]
    #[validate(length(min = 1, max = 100, message = "Plot name is required"))]
    #[schema(example = "North field")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    #[validate(length(max = 20, message = "Color is too long"))]
    #[schema(example = "#22c55e")]
    pub color: Option<String>,
    #[serde(default)]
    pub coordinates: Vec<Coordinate>,
}

impl FarmPlotInput {
    /// Chosen color, or the default plot color.
    pub fn color_or_default(&self) -> String {
        self.color
            .clone()
            .unwrap_or_else(|| DEFAULT_PLOT_COLOR.to_string())
    }
}

/// Row data handed to the repository
#[derive(Debug, Clone)]
pub struct FarmPlotData {
    pub beneficiary_id: String,
    pub name: String,
    pub color: String,
    pub coordinates: Vec<Coordinate>,
}

impl From<FarmPlotInput> for FarmPlotData {
    fn from(input: FarmPlotInput) -> Self {
        let color = input.color_or_default();
        Self {
            beneficiary_id: input.beneficiary_id,
            name: input.name,
            color,
            coordinates: input.coordinates,
        }
    }
}

/// Farm plot as returned to the dashboard
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FarmPlotResponse {
    pub id: i32,
    pub beneficiary_id: String,
    pub beneficiary_name: Option<String>,
    pub address: Option<String>,
    pub name: String,
    pub color: String,
    pub coordinates: Vec<Coordinate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FarmPlotResponse {
    pub fn new(plot: FarmPlot, owner: OwnerSummary) -> Self {
        Self {
            id: plot.id,
            beneficiary_id: plot.beneficiary_id,
            beneficiary_name: owner.beneficiary_name,
            address: owner.address,
            name: plot.name,
            color: plot.color,
            coordinates: plot.coordinates,
            created_at: plot.created_at,
            updated_at: plot.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square() -> Vec<Coordinate> {
        vec![
            Coordinate::new(14.16, 121.24),
            Coordinate::new(14.17, 121.24),
            Coordinate::new(14.17, 121.25),
        ]
    }

    #[test]
    fn test_boundary_needs_three_vertices() {
        assert!(ensure_boundary(&square()).is_ok());
        assert!(ensure_boundary(&square()[..2]).is_err());
        assert!(ensure_boundary(&[]).is_err());
    }

    #[test]
    fn test_boundary_rejects_out_of_range_vertex() {
        let mut coords = square();
        coords.push(Coordinate::new(95.0, 121.0));
        assert!(matches!(
            ensure_boundary(&coords),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_color_uses_default() {
        let input: FarmPlotInput = serde_json::from_value(json!({
            "beneficiaryId": "JD001",
            "name": "North field",
            "color": "",
            "coordinates": [
                {"lat": 14.16, "lng": 121.24},
                {"lat": "14°10'N", "lng": "121 15 E"},
                {"lat": 14.17, "lng": 121.25}
            ]
        }))
        .unwrap();

        let data = FarmPlotData::from(input);
        assert_eq!(data.color, DEFAULT_PLOT_COLOR);
        assert_eq!(data.coordinates.len(), 3);
        assert!(ensure_boundary(&data.coordinates).is_ok());
    }
}
