use axum::{http::StatusCode, response::Json};
use compute::AnalysisError;
use polars::prelude::DataFrame;
use tracing::{debug, error, trace};

use crate::schemas::{AppState, CachedData, ErrorResponse};

const ACADEMIC_K8_KEY: &str = "academic_k8";

pub type HandlerError = (StatusCode, Json<ErrorResponse>);

/// The parsed K-8 academic file, read from disk at most once per cache TTL
pub async fn load_academic_frame(state: &AppState) -> Result<DataFrame, HandlerError> {
    if let Some(CachedData::AcademicK8(df)) = state.cache.get(ACADEMIC_K8_KEY).await {
        trace!("Academic data served from cache");
        return Ok(df);
    }

    let source = state.data.clone();
    let loaded = tokio::task::spawn_blocking(move || source.load_k8())
        .await
        .map_err(|e| {
            error!("Academic data loading task failed: {}", e);
            data_unavailable(e.to_string())
        })?;

    let df = loaded.map_err(|e| {
        error!("Failed to load academic data: {}", e);
        data_unavailable(e.to_string())
    })?;

    debug!("Loaded academic data: {} rows, {} columns", df.height(), df.width());
    state
        .cache
        .insert(ACADEMIC_K8_KEY.to_string(), CachedData::AcademicK8(df.clone()))
        .await;
    Ok(df)
}

fn data_unavailable(detail: String) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(
            format!("Academic data is unavailable: {}", detail),
            "DATA_UNAVAILABLE",
        )),
    )
}

/// Map a processing failure to a 500 response
pub fn analysis_failed(err: AnalysisError) -> HandlerError {
    error!("Academic data processing failed: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(err.to_string(), "ANALYSIS_ERROR")),
    )
}
