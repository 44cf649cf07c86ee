//! Glossary endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::Glossary;
use crate::services::glossary::GlossaryService;
use crate::AppState;

/// POST /requirements/glossary
///
/// Regenerates the glossary from the full requirement set, replacing the
/// previous one.
pub async fn generate_glossary(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<Glossary>)> {
    let service = GlossaryService::new(state.db.clone(), state.ai.clone());
    let glossary = service.generate_and_save().await?;

    Ok((StatusCode::CREATED, Json(glossary)))
}

/// GET /requirements/glossary
pub async fn get_glossary(State(state): State<AppState>) -> ApiResult<Json<Glossary>> {
    let glossary = db::glossary::find_current(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("No glossary has been generated yet".to_string()))?;

    Ok(Json(glossary))
}

/// Build glossary routes
pub fn glossary_routes() -> Router<AppState> {
    Router::new().route(
        "/requirements/glossary",
        post(generate_glossary).get(get_glossary),
    )
}
