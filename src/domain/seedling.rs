//! Seedling distribution and planting records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::beneficiary::OwnerSummary;
use crate::types::lenient;

/// Seedlings received and planted by one beneficiary
#[derive(Debug, Clone, PartialEq)]
pub struct SeedlingRecord {
    pub id: i32,
    pub beneficiary_id: String,
    pub seedlings_received: i32,
    pub date_received: NaiveDate,
    pub seedlings_planted: i32,
    pub hectares: f64,
    pub planting_start: NaiveDate,
    pub planting_end: Option<NaiveDate>,
    pub gps: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_planting_window"))]
pub struct SeedlingInput {
    #[serde(deserialize_with = "lenient::text")]
    #[validate(length(min = 1, max = 20, message = "Beneficiary ID is required"))]
    #[schema(example = "JD001")]
    pub beneficiary_id: String,
    #[serde(deserialize_with = "lenient::number")]
    #[validate(range(min = 0, message = "Seedlings received cannot be negative"))]
    #[schema(example = 500)]
    pub seedlings_received: i32,
    #[serde(deserialize_with = "lenient::date")]
    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub date_received: NaiveDate,
    #[serde(deserialize_with = "lenient::number")]
    #[validate(range(min = 0, message = "Seedlings planted cannot be negative"))]
    #[schema(example = 480)]
    pub seedlings_planted: i32,
    #[serde(deserialize_with = "lenient::number")]
    #[validate(range(min = 0.0, message = "Hectares cannot be negative"))]
    #[schema(example = 1.25)]
    pub hectares: f64,
    #[serde(deserialize_with = "lenient::date")]
    #[schema(value_type = String, format = Date, example = "2024-06-03")]
    pub planting_start: NaiveDate,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    #[schema(value_type = Option<String>, format = Date, example = "2024-06-10")]
    pub planting_end: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    #[validate(length(max = 100, message = "GPS is too long"))]
    #[schema(example = "14.1670, 121.2430")]
    pub gps: Option<String>,
}

fn validate_planting_window(input: &SeedlingInput) -> Result<(), ValidationError> {
    match input.planting_end {
        Some(end) if end < input.planting_start => Err(ValidationError::new("planting_window")
            .with_message("Planting end date cannot be before the start date".into())),
        _ if !input.hectares.is_finite() => Err(ValidationError::new("hectares")
            .with_message("Hectares must be a number".into())),
        _ => Ok(()),
    }
}

/// Seedling record as returned to the dashboard
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedlingResponse {
    pub id: i32,
    pub beneficiary_id: String,
    pub beneficiary_name: Option<String>,
    pub address: Option<String>,
    pub seedlings_received: i32,
    #[schema(value_type = String, format = Date)]
    pub date_received: NaiveDate,
    pub seedlings_planted: i32,
    pub hectares: f64,
    #[schema(value_type = String, format = Date)]
    pub planting_start: NaiveDate,
    #[schema(value_type = Option<String>, format = Date)]
    pub planting_end: Option<NaiveDate>,
    pub gps: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SeedlingResponse {
    pub fn new(record: SeedlingRecord, owner: OwnerSummary) -> Self {
        Self {
            id: record.id,
            beneficiary_id: record.beneficiary_id,
            beneficiary_name: owner.beneficiary_name,
            address: owner.address,
            seedlings_received: record.seedlings_received,
            date_received: record.date_received,
            seedlings_planted: record.seedlings_planted,
            hectares: record.hectares,
            planting_start: record.planting_start,
            planting_end: record.planting_end,
            gps: record.gps,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
