//! Edit form validation endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{EditValidation, PackageEdit, ResourceEdit, TitleEdit},
    AppState,
};

/// Validate a resource edit form
#[utoipa::path(
    post,
    path = "/resources/validate",
    tag = "edits",
    request_body = ResourceEdit,
    responses(
        (status = 200, description = "Validation outcome", body = EditValidation)
    )
)]
pub async fn validate_resource(
    State(state): State<AppState>,
    Json(edit): Json<ResourceEdit>,
) -> AppResult<Json<EditValidation>> {
    let result = state.services.edits.validate_resource(&edit)?;
    Ok(Json(result))
}

/// Validate a custom package edit form
#[utoipa::path(
    post,
    path = "/packages/validate",
    tag = "edits",
    request_body = PackageEdit,
    responses(
        (status = 200, description = "Validation outcome", body = EditValidation)
    )
)]
pub async fn validate_package(
    State(state): State<AppState>,
    Json(edit): Json<PackageEdit>,
) -> AppResult<Json<EditValidation>> {
    let result = state.services.edits.validate_package(&edit)?;
    Ok(Json(result))
}

/// Validate a custom title edit form
#[utoipa::path(
    post,
    path = "/titles/validate",
    tag = "edits",
    request_body = TitleEdit,
    responses(
        (status = 200, description = "Validation outcome", body = EditValidation)
    )
)]
pub async fn validate_title(
    State(state): State<AppState>,
    Json(edit): Json<TitleEdit>,
) -> AppResult<Json<EditValidation>> {
    let result = state.services.edits.validate_title(&edit)?;
    Ok(Json(result))
}
