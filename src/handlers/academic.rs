use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use axum_valid::Valid;
use compute::build_academic_analysis;
use tracing::{debug, instrument, trace};

use crate::helpers::data::{HandlerError, analysis_failed, load_academic_frame};
use crate::schemas::{AcademicAnalysisRequest, ApiResponse, AppState, ErrorResponse};

/// Charts and tables comparing the selected schools
#[utoipa::path(
    post,
    path = "/api/v1/academic-analysis",
    tag = "academic",
    request_body = AcademicAnalysisRequest,
    responses(
        (status = 200, description = "Analysis assembled", body = ApiResponse<AcademicAnalysis>),
        (status = 204, description = "No schools selected, nothing to update"),
        (status = 400, description = "Invalid year"),
        (status = 401, description = "Not logged in", body = UnauthorizedResponse),
        (status = 500, description = "Academic data unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn academic_analysis(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<AcademicAnalysisRequest>>,
) -> Result<Response, HandlerError> {
    trace!("Entering academic_analysis function");
    if request.schools.is_empty() {
        debug!("No schools selected");
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let df = load_academic_frame(&state).await?;
    let analysis = tokio::task::spawn_blocking(move || {
        build_academic_analysis(&df, &request.year, &request.schools)
    })
    .await
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e.to_string(), "ANALYSIS_ERROR")),
        )
    })?
    .map_err(analysis_failed)?;

    Ok(Json(ApiResponse {
        data: analysis,
        message: "Academic analysis assembled successfully".to_string(),
        success: true,
    })
    .into_response())
}
