use common::{
    AcademicAnalysis, ChartKind, ChartSeries, ComparisonPanel, ComparisonTable,
    CorporationDropdown, DropdownOption, Figure, NoDataPage, SchoolDropdown,
};
use compute::AcademicDataSource;
use moka::future::Cache;
use polars::prelude::DataFrame;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use validator::Validate;

use crate::auth::SessionStore;

pub use common::ApiResponse;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection (user store)
    pub db: DatabaseConnection,
    /// Cache for parsed data files
    pub cache: Cache<String, CachedData>,
    /// Server-side sessions keyed by cookie value
    pub sessions: SessionStore,
    /// Where the academic data files live
    pub data: AcademicDataSource,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    AcademicK8(DataFrame),
}

/// Body of the corporation dropdown callback
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CorporationDropdownRequest {
    /// Selected year (e.g., "2022")
    #[validate(length(equal = 4))]
    pub year: String,
    /// Currently selected corporation ids
    #[serde(default)]
    pub selected: Vec<i64>,
}

/// Body of the school dropdown callback
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SchoolDropdownRequest {
    /// Selected corporation ids
    #[serde(default)]
    pub corporations: Vec<i64>,
    /// Currently selected school ids
    #[serde(default)]
    pub selected: Vec<i64>,
}

/// Body of the academic analysis callback
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct AcademicAnalysisRequest {
    /// Selected year (e.g., "2022")
    #[validate(length(equal = 4))]
    pub year: String,
    /// Selected school ids; an empty list means nothing to update
    #[serde(default)]
    pub schools: Vec<i64>,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }
    }
}

/// Payload returned to unauthenticated non-GET requests
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UnauthorizedResponse {
    pub status: String,
    #[serde(rename = "statusText")]
    pub status_text: String,
}

impl Default for UnauthorizedResponse {
    fn default() -> Self {
        Self {
            status: "401".to_string(),
            status_text: "unauthorized access".to_string(),
        }
    }
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
    /// Academic data file status
    pub data: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::dropdowns::get_years,
        crate::handlers::dropdowns::corporation_options,
        crate::handlers::dropdowns::school_options,
        crate::handlers::academic::academic_analysis,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            UnauthorizedResponse,
            CorporationDropdownRequest,
            SchoolDropdownRequest,
            AcademicAnalysisRequest,
            DropdownOption,
            CorporationDropdown,
            SchoolDropdown,
            AcademicAnalysis,
            ComparisonPanel,
            ComparisonTable,
            Figure,
            ChartKind,
            ChartSeries,
            NoDataPage,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "dropdowns", description = "Year, corporation and school selectors"),
        (name = "academic", description = "Academic analysis figures"),
    ),
    info(
        title = "SchoolDash API",
        description = "Academic comparison dashboard for public schools",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
