use axum::{extract::State, response::Json};
use axum_valid::Valid;
use common::{CorporationDropdown, SchoolDropdown};
use compute::{academic_years, corporation_dropdown, school_dropdown};
use tracing::{debug, instrument, trace};

use crate::helpers::data::{HandlerError, analysis_failed, load_academic_frame};
use crate::schemas::{ApiResponse, AppState, CorporationDropdownRequest, SchoolDropdownRequest};

/// Years present in the academic data, newest first
#[utoipa::path(
    get,
    path = "/api/v1/years",
    tag = "dropdowns",
    responses(
        (status = 200, description = "Years retrieved successfully", body = ApiResponse<Vec<String>>),
        (status = 401, description = "Not logged in", body = UnauthorizedResponse),
        (status = 500, description = "Academic data unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_years(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<String>>>, HandlerError> {
    trace!("Entering get_years function");
    let df = load_academic_frame(&state).await?;
    let years = academic_years(&df).map_err(analysis_failed)?;
    debug!("Found {} years", years.len());

    Ok(Json(ApiResponse {
        data: years,
        message: "Years retrieved successfully".to_string(),
        success: true,
    }))
}

/// Corporation options for the selected year
#[utoipa::path(
    post,
    path = "/api/v1/dropdowns/corporations",
    tag = "dropdowns",
    request_body = CorporationDropdownRequest,
    responses(
        (status = 200, description = "Corporation options", body = ApiResponse<CorporationDropdown>),
        (status = 400, description = "Invalid year"),
        (status = 401, description = "Not logged in", body = UnauthorizedResponse),
        (status = 500, description = "Academic data unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn corporation_options(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CorporationDropdownRequest>>,
) -> Result<Json<ApiResponse<CorporationDropdown>>, HandlerError> {
    trace!("Entering corporation_options function");
    let df = load_academic_frame(&state).await?;
    let dropdown =
        corporation_dropdown(&df, &request.year, &request.selected).map_err(analysis_failed)?;

    Ok(Json(ApiResponse {
        data: dropdown,
        message: "Corporation options retrieved successfully".to_string(),
        success: true,
    }))
}

/// School options for the selected corporations
#[utoipa::path(
    post,
    path = "/api/v1/dropdowns/schools",
    tag = "dropdowns",
    request_body = SchoolDropdownRequest,
    responses(
        (status = 200, description = "School options", body = ApiResponse<SchoolDropdown>),
        (status = 401, description = "Not logged in", body = UnauthorizedResponse),
        (status = 500, description = "Academic data unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn school_options(
    State(state): State<AppState>,
    Json(request): Json<SchoolDropdownRequest>,
) -> Result<Json<ApiResponse<SchoolDropdown>>, HandlerError> {
    trace!("Entering school_options function");
    let df = load_academic_frame(&state).await?;
    let dropdown = school_dropdown(&df, &request.corporations, &request.selected)
        .map_err(analysis_failed)?;
    debug!(
        "{} school options, {} selected",
        dropdown.options.len(),
        dropdown.value.len()
    );

    Ok(Json(ApiResponse {
        data: dropdown,
        message: "School options retrieved successfully".to_string(),
        success: true,
    }))
}
