//! Requirement CRUD endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::{Requirement, RequirementDto};
use crate::services::description;
use crate::services::ranking::RankingService;
use crate::AppState;

/// Query parameters for listing requirements
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// When present, the list is reordered by importance to this stakeholder
    pub stakeholder: Option<String>,
}

/// POST /requirements
pub async fn create_requirement(
    State(state): State<AppState>,
    Json(dto): Json<RequirementDto>,
) -> ApiResult<(StatusCode, Json<Requirement>)> {
    dto.validate()?;

    let requirement = db::requirements::insert(&state.db, &dto).await?;

    tracing::info!(id = %requirement.id, "Requirement created");

    Ok((StatusCode::CREATED, Json(requirement)))
}

/// POST /requirements/ai-description
///
/// Create a requirement with its description generated by the model from
/// the submitted title, type and stakeholders. A generation failure aborts the
/// creation.
pub async fn create_requirement_with_ai(
    State(state): State<AppState>,
    Json(mut dto): Json<RequirementDto>,
) -> ApiResult<(StatusCode, Json<Requirement>)> {
    dto.validate()?;

    let generated = description::generate_description(state.ai.as_ref(), &dto).await?;
    dto.description = Some(generated);

    let requirement = db::requirements::insert(&state.db, &dto).await?;

    tracing::info!(id = %requirement.id, "Requirement created with AI description");

    Ok((StatusCode::CREATED, Json(requirement)))
}

/// GET /requirements
///
/// Lists all requirements. With `?stakeholder=NAME` the list is reordered
/// by the ranking model; ranking failures degrade to the stored order.
pub async fn get_requirements(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Requirement>>> {
    let requirements = db::requirements::find_all(&state.db).await?;

    let requirements = match params.stakeholder {
        Some(stakeholder) if !requirements.is_empty() => {
            let service = RankingService::new(state.ai.clone());
            service
                .reorder_by_stakeholder(requirements, &stakeholder)
                .await
        }
        _ => requirements,
    };

    Ok(Json(requirements))
}

/// GET /requirements/:id
pub async fn get_requirement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Requirement>> {
    let requirement = db::requirements::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Requirement not found: {}", id)))?;

    Ok(Json(requirement))
}

/// Build requirement routes
pub fn requirement_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/requirements",
            post(create_requirement).get(get_requirements),
        )
        .route("/requirements/ai-description", post(create_requirement_with_ai))
        .route("/requirements/:id", get(get_requirement))
}
