//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{coverage, edits, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "eHoldings Coverage API",
        version = "0.1.0",
        description = "Validation and ordering of custom coverage dates for e-resources",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Coverage
        coverage::validate_coverage,
        coverage::sort_coverage,
        coverage::prepare_coverage,
        coverage::describe_coverage,
        // Edit forms
        edits::validate_resource,
        edits::validate_package,
        edits::validate_title,
    ),
    components(
        schemas(
            // Coverage
            crate::models::coverage::CoverageRange,
            crate::models::coverage::CoverageField,
            crate::models::coverage::CoveragePayload,
            coverage::CoverageScope,
            coverage::CoverageSetRequest,
            coverage::CoverageListRequest,
            coverage::CoverageListResponse,
            coverage::ValidateCoverageResponse,
            coverage::PreparedCoverageResponse,
            coverage::DescribeCoverageResponse,
            // Edit forms
            crate::models::enums::PublicationType,
            crate::models::enums::EmbargoUnit,
            crate::models::resource::CustomEmbargo,
            crate::models::resource::ResourceEdit,
            crate::models::resource::PackageEdit,
            crate::models::resource::TitleEdit,
            crate::models::resource::EditValidation,
            // Health
            health::HealthResponse,
            health::ReadinessResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "coverage", description = "Coverage date ranges"),
        (name = "edits", description = "Edit form validation")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
