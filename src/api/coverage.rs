//! Coverage date range endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    coverage::{is_valid, CoverageRules, RangeErrors},
    error::AppResult,
    models::{CoveragePayload, CoverageRange, PublicationType},
    AppState,
};

/// Which kind of record the coverage set belongs to
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CoverageScope {
    /// Title or resource custom coverage, constrained by the package
    #[default]
    Resource,
    /// A custom package's own coverage
    Package,
}

impl From<CoverageScope> for CoverageRules {
    fn from(scope: CoverageScope) -> Self {
        match scope {
            CoverageScope::Resource => CoverageRules::Resource,
            CoverageScope::Package => CoverageRules::Package,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoverageSetRequest {
    #[serde(default)]
    pub custom_coverages: Vec<CoverageRange>,
    /// Package coverage window the ranges must fall within
    pub parent_coverage: Option<CoverageRange>,
    #[serde(default)]
    pub scope: CoverageScope,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidateCoverageResponse {
    pub valid: bool,
    /// One entry per submitted range: `{}` or `{ field: message }`
    #[schema(value_type = Vec<Object>)]
    pub errors: Vec<RangeErrors>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoverageListRequest {
    #[serde(default)]
    pub custom_coverages: Vec<CoverageRange>,
    pub publication_type: Option<PublicationType>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoverageListResponse {
    pub custom_coverages: Vec<CoverageRange>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreparedCoverageResponse {
    pub custom_coverages: Vec<CoveragePayload>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DescribeCoverageResponse {
    pub descriptions: Vec<String>,
}

/// Validate a coverage set
#[utoipa::path(
    post,
    path = "/coverage/validate",
    tag = "coverage",
    request_body = CoverageSetRequest,
    responses(
        (status = 200, description = "Field errors per range", body = ValidateCoverageResponse)
    )
)]
pub async fn validate_coverage(
    State(state): State<AppState>,
    Json(request): Json<CoverageSetRequest>,
) -> Json<ValidateCoverageResponse> {
    let errors = state.services.coverage.validate_set(
        &request.custom_coverages,
        request.parent_coverage.as_ref(),
        request.scope.into(),
    );
    Json(ValidateCoverageResponse {
        valid: is_valid(&errors),
        errors,
    })
}

/// Sort a coverage set by end date, open ranges last
#[utoipa::path(
    post,
    path = "/coverage/sort",
    tag = "coverage",
    request_body = CoverageListRequest,
    responses(
        (status = 200, description = "Sorted coverage set", body = CoverageListResponse)
    )
)]
pub async fn sort_coverage(
    State(state): State<AppState>,
    Json(request): Json<CoverageListRequest>,
) -> Json<CoverageListResponse> {
    Json(CoverageListResponse {
        custom_coverages: state.services.coverage.sort_set(&request.custom_coverages),
    })
}

/// Validate, sort and normalize a coverage set for saving
#[utoipa::path(
    post,
    path = "/coverage/prepare",
    tag = "coverage",
    request_body = CoverageSetRequest,
    responses(
        (status = 200, description = "Coverage set ready to persist", body = PreparedCoverageResponse),
        (status = 400, description = "Set not allowed for this scope", body = crate::error::ErrorResponse),
        (status = 422, description = "Coverage dates rejected", body = crate::error::ErrorResponse)
    )
)]
pub async fn prepare_coverage(
    State(state): State<AppState>,
    Json(request): Json<CoverageSetRequest>,
) -> AppResult<Json<PreparedCoverageResponse>> {
    let custom_coverages = state.services.coverage.prepare_save(
        &request.custom_coverages,
        request.parent_coverage.as_ref(),
        request.scope.into(),
    )?;
    Ok(Json(PreparedCoverageResponse { custom_coverages }))
}

/// Display strings for a coverage set
#[utoipa::path(
    post,
    path = "/coverage/describe",
    tag = "coverage",
    request_body = CoverageListRequest,
    responses(
        (status = 200, description = "Formatted ranges", body = DescribeCoverageResponse)
    )
)]
pub async fn describe_coverage(
    State(state): State<AppState>,
    Json(request): Json<CoverageListRequest>,
) -> Json<DescribeCoverageResponse> {
    Json(DescribeCoverageResponse {
        descriptions: state
            .services
            .coverage
            .describe(&request.custom_coverages, request.publication_type),
    })
}
