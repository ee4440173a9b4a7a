//! Beneficiary handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::MultipartForm;
use crate::api::AppState;
use crate::domain::{BeneficiaryInput, BeneficiaryResponse};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse};

/// Form field carrying the beneficiary photo
const PICTURE_FIELD: &str = "picture";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Substring of the name or beneficiary ID
    pub search: Option<String>,
}

pub fn beneficiary_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_beneficiaries).post(create_beneficiary))
        .route(
            "/:id",
            get(get_beneficiary)
                .put(update_beneficiary)
                .delete(delete_beneficiary),
        )
}

/// List beneficiaries, newest first
#[utoipa::path(
    get,
    path = "/api/beneficiaries",
    tag = "Beneficiaries",
    params(SearchQuery),
    responses((status = 200, description = "Beneficiaries", body = Vec<BeneficiaryResponse>)),
    security(("bearer_auth" = []))
)]
pub async fn list_beneficiaries(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<BeneficiaryResponse>>> {
    let search = query.search.filter(|s| !s.trim().is_empty());
    Ok(Json(state.beneficiary_service.list(search).await?))
}

#[utoipa::path(
    get,
    path = "/api/beneficiaries/{id}",
    tag = "Beneficiaries",
    params(("id" = i32, Path, description = "Beneficiary row id")),
    responses(
        (status = 200, description = "Beneficiary", body = BeneficiaryResponse),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_beneficiary(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BeneficiaryResponse>> {
    Ok(Json(state.beneficiary_service.get(id).await?))
}

/// Register a beneficiary; the identifier is generated from the name
#[utoipa::path(
    post,
    path = "/api/beneficiaries",
    tag = "Beneficiaries",
    request_body(content = BeneficiaryInput, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Created", body = BeneficiaryResponse),
        (status = 400, description = "Validation error or duplicate name")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_beneficiary(
    State(state): State<AppState>,
    MultipartForm { fields, mut files }: MultipartForm<BeneficiaryInput>,
) -> AppResult<Created<BeneficiaryResponse>> {
    let picture = files.take_one(PICTURE_FIELD);
    let created = state.beneficiary_service.create(fields, picture).await?;
    Ok(Created(created))
}

#[utoipa::path(
    put,
    path = "/api/beneficiaries/{id}",
    tag = "Beneficiaries",
    params(("id" = i32, Path, description = "Beneficiary row id")),
    request_body(content = BeneficiaryInput, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated", body = BeneficiaryResponse),
        (status = 400, description = "Validation error or duplicate name"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_beneficiary(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    MultipartForm { fields, mut files }: MultipartForm<BeneficiaryInput>,
) -> AppResult<Json<BeneficiaryResponse>> {
    let picture = files.take_one(PICTURE_FIELD);
    Ok(Json(
        state.beneficiary_service.update(id, fields, picture).await?,
    ))
}

/// Delete a beneficiary with all of its records
#[utoipa::path(
    delete,
    path = "/api/beneficiaries/{id}",
    tag = "Beneficiaries",
    params(("id" = i32, Path, description = "Beneficiary row id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_beneficiary(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.beneficiary_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Beneficiary deleted successfully")))
}
