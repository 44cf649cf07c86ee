//! Wiegers matrix endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::WiegersMatrixEntry;
use crate::services::wiegers::WiegersService;
use crate::AppState;

/// POST /requirements/wiegers/analyze
///
/// Body: JSON array of requirement ids. Generates ratings for every
/// resolved requirement and persists one matrix entry per rating.
pub async fn analyze_requirements(
    State(state): State<AppState>,
    Json(requirement_ids): Json<Vec<String>>,
) -> ApiResult<(StatusCode, Json<Vec<WiegersMatrixEntry>>)> {
    if requirement_ids.is_empty() {
        return Err(ApiError::BadRequest(
            "at least one requirement id is required".to_string(),
        ));
    }

    let service = WiegersService::new(state.db.clone(), state.ai.clone());
    let entries = service.generate_ratings(&requirement_ids).await?;

    Ok((StatusCode::CREATED, Json(entries)))
}

/// GET /requirements/wiegers
///
/// All matrix entries, highest priority first; equal priorities keep
/// insertion order.
pub async fn get_matrix(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<WiegersMatrixEntry>>> {
    let entries = db::wiegers::find_all(&state.db).await?;
    Ok(Json(entries))
}

/// GET /requirements/wiegers/:requirement_id
pub async fn get_matrix_entry(
    State(state): State<AppState>,
    Path(requirement_id): Path<String>,
) -> ApiResult<Json<WiegersMatrixEntry>> {
    let entry = db::wiegers::find_by_requirement_id(&state.db, &requirement_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No matrix entry for requirement: {}",
                requirement_id
            ))
        })?;

    Ok(Json(entry))
}

/// Build Wiegers matrix routes
pub fn wiegers_routes() -> Router<AppState> {
    Router::new()
        .route("/requirements/wiegers/analyze", post(analyze_requirements))
        .route("/requirements/wiegers", get(get_matrix))
        .route("/requirements/wiegers/:requirement_id", get(get_matrix_entry))
}
