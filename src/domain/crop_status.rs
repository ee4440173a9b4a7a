//! Crop survival surveys.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::beneficiary::OwnerSummary;
use crate::config::UPLOADS_ROUTE;
use crate::errors::{AppError, AppResult};
use crate::types::lenient;

/// One survey of alive/dead crops for a beneficiary
#[derive(Debug, Clone, PartialEq)]
pub struct CropStatusRecord {
    pub id: i32,
    pub beneficiary_id: String,
    pub survey_date: NaiveDate,
    pub surveyor: String,
    pub alive_crops: i32,
    pub dead_crops: i32,
    pub plot: Option<String>,
    /// Stored image filenames, in upload order
    pub pictures: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CropStatusRecord {
    /// Share of surveyed crops still alive, as a percentage.
    pub fn survival_rate(&self) -> f64 {
        super::statistics::survival_rate(self.alive_crops.into(), self.dead_crops.into())
    }
}

/// Form fields for create/update (multipart text parts)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropStatusInput {
    #[serde(deserialize_with = "lenient::text")]
    #[validate(length(min = 1, max = 20, message = "Beneficiary ID is required"))]
    #[schema(example = "JD001")]
    pub beneficiary_id: String,
    #[serde(deserialize_with = "lenient::date")]
    #[schema(value_type = String, format = Date, example = "2024-09-15")]
    pub survey_date: NaiveDate,
    #[serde(deserialize_with = "lenient::text")]
    #[validate(length(min = 1, max = 100, message = "Surveyor is required"))]
    #[schema(example = "Maria Santos")]
    pub surveyor: String,
    #[serde(deserialize_with = "lenient::number")]
    #[validate(range(min = 0, message = "Alive crops cannot be negative"))]
    #[schema(example = 450)]
    pub alive_crops: i32,
    #[serde(deserialize_with = "lenient::number")]
    #[validate(range(min = 0, message = "Dead crops cannot be negative"))]
    #[schema(example = 30)]
    pub dead_crops: i32,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    #[validate(length(max = 100, message = "Plot label is too long"))]
    #[schema(example = "Plot A")]
    pub plot: Option<String>,
    /// JSON array of already-stored filenames to keep (update only)
    #[serde(default, deserialize_with = "lenient::optional_text")]
    #[schema(example = "[\"crop_1700000000_1a2b3c4d.jpg\"]")]
    pub existing_pictures: Option<String>,
}

impl CropStatusInput {
    /// Filenames the client asked to keep; `None` when the field was absent.
    pub fn kept_pictures(&self) -> AppResult<Option<Vec<String>>> {
        self.existing_pictures
            .as_deref()
            .map(|raw| {
                serde_json::from_str::<Vec<String>>(raw).map_err(|_| {
                    AppError::validation("existingPictures must be a JSON array of filenames")
                })
            })
            .transpose()
    }
}

/// Row data handed to the repository
#[derive(Debug, Clone)]
pub struct CropStatusData {
    pub beneficiary_id: String,
    pub survey_date: NaiveDate,
    pub surveyor: String,
    pub alive_crops: i32,
    pub dead_crops: i32,
    pub plot: Option<String>,
    pub pictures: Vec<String>,
}

impl CropStatusData {
    pub fn new(input: CropStatusInput, pictures: Vec<String>) -> Self {
        Self {
            beneficiary_id: input.beneficiary_id,
            survey_date: input.survey_date,
            surveyor: input.surveyor,
            alive_crops: input.alive_crops,
            dead_crops: input.dead_crops,
            plot: input.plot,
            pictures,
        }
    }
}

/// Survey as returned to the dashboard
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropStatusResponse {
    pub id: i32,
    pub beneficiary_id: String,
    pub beneficiary_name: Option<String>,
    pub address: Option<String>,
    #[schema(value_type = String, format = Date)]
    pub survey_date: NaiveDate,
    pub surveyor: String,
    pub alive_crops: i32,
    pub dead_crops: i32,
    #[schema(example = 93.75)]
    pub survival_rate: f64,
    pub plot: Option<String>,
    pub pictures: Vec<String>,
    pub picture_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CropStatusResponse {
    pub fn new(record: CropStatusRecord, owner: OwnerSummary) -> Self {
        let survival_rate = record.survival_rate();
        let picture_urls = record
            .pictures
            .iter()
            .map(|file| format!("{}/{}", UPLOADS_ROUTE, file))
            .collect();

        Self {
            id: record.id,
            beneficiary_id: record.beneficiary_id,
            beneficiary_name: owner.beneficiary_name,
            address: owner.address,
            survey_date: record.survey_date,
            surveyor: record.surveyor,
            alive_crops: record.alive_crops,
            dead_crops: record.dead_crops,
            survival_rate,
            plot: record.plot,
            pictures: record.pictures,
            picture_urls,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
