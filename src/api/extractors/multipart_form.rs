//! Multipart form extractor for the upload endpoints.
//!
//! Text parts are gathered into a JSON object and deserialized into `T`
//! (so the lenient field helpers apply), then validated. File parts are
//! kept in memory, grouped by field name.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{multipart::MultipartError, FromRequest, Multipart, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use super::format_validation_errors;
use crate::errors::AppError;
use crate::infra::UploadedFile;

/// Uploaded files keyed by form field name
#[derive(Debug, Default)]
pub struct FileParts(HashMap<String, Vec<UploadedFile>>);

impl FileParts {
    /// First file sent under `field`, if any.
    pub fn take_one(&mut self, field: &str) -> Option<UploadedFile> {
        self.0
            .remove(field)
            .and_then(|files| files.into_iter().next())
    }

    /// Every file sent under `field`, in upload order.
    pub fn take_all(&mut self, field: &str) -> Vec<UploadedFile> {
        self.0.remove(field).unwrap_or_default()
    }
}

pub struct MultipartForm<T> {
    pub fields: T,
    pub files: FileParts,
}

fn multipart_error(status: StatusCode, text: String) -> AppError {
    match status {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge,
        _ => AppError::bad_request(text),
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        multipart_error(e.status(), e.body_text())
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for MultipartForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| multipart_error(e.status(), e.body_text()))?;

        let mut text = Map::new();
        let mut files: HashMap<String, Vec<UploadedFile>> = HashMap::new();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field.bytes().await?;
                    // Browsers send an empty part for an untouched file input
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    files
                        .entry(name)
                        .or_default()
                        .push(UploadedFile::new(Some(file_name), bytes.to_vec()));
                }
                None => {
                    let value = field.text().await?;
                    text.insert(name, Value::String(value));
                }
            }
        }

        let fields: T = serde_json::from_value(Value::Object(text))
            .map_err(|e| AppError::validation(e.to_string()))?;
        fields
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(Self {
            fields,
            files: FileParts(files),
        })
    }
}
