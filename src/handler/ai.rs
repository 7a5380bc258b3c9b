use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    db::projectdb::ProjectExt,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    service::{matching_service::DEFAULT_MATCH_LIMIT, starter_kit::generate_starter_kit},
    AppState,
};

pub fn ai_handler() -> Router {
    Router::new()
        .route("/starter-kit", post(project_starter_kit))
        .route("/recommendations", get(get_recommendations))
        .route("/projects/:project_id/collaborators", get(get_collaborator_matches))
}

#[derive(Debug, Deserialize)]
pub struct StarterKitDto {
    pub domain: Option<String>,
    #[serde(default)]
    pub skills_required: Vec<String>,
}

pub async fn project_starter_kit(
    Json(body): Json<StarterKitDto>,
) -> Result<impl IntoResponse, HttpError> {
    let domain = body.domain.unwrap_or_default();
    let starter_kit = generate_starter_kit(&domain, &body.skills_required);

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": starter_kit
    })))
}

#[derive(Debug, Deserialize)]
pub struct MatchQuery {
    pub limit: Option<usize>,
}

pub async fn get_recommendations(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Query(query): Query<MatchQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let limit = query.limit.unwrap_or(DEFAULT_MATCH_LIMIT).clamp(1, 50);

    let recommendations = app_state
        .matching_service
        .recommend_projects_for_user(&auth.user, limit)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": recommendations
    })))
}

pub async fn get_collaborator_matches(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
    Query(query): Query<MatchQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let limit = query.limit.unwrap_or(DEFAULT_MATCH_LIMIT).clamp(1, 50);

    let project = app_state
        .db_client
        .get_project(project_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Project not found"))?;

    if project.owner_id != auth.user.id {
        return Err(HttpError::unauthorized(
            "Only the project owner can view collaborator matches",
        ));
    }

    let matches = app_state
        .matching_service
        .find_collaborators_for_project(&project, limit)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": matches
    })))
}
