use std::sync::Arc;

use axum::{extract::Query, response::IntoResponse, routing::get, Extension, Json, Router};
use serde::Deserialize;

use crate::{
    db::{projectdb::ProjectExt, userdb::UserExt},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::projectmodel::{Domain, ProjectStage},
    AppState,
};

const TRENDING_WINDOW_DAYS: i32 = 90;

pub fn feed_handler() -> Router {
    Router::new()
        .route("/", get(get_feed))
        .route("/trending", get(get_trending))
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    /// all | following | collaborators | domain | location | stage
    #[serde(rename = "type")]
    pub feed_type: Option<String>,
    pub domain: Option<Domain>,
    pub location: Option<String>,
    pub stage: Option<ProjectStage>,
    pub q: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Filterable project feed. The `all` view also carries a small
/// recommendations rail computed by the matching service.
pub async fn get_feed(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Query(query): Query<FeedQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let feed_type = query.feed_type.unwrap_or_else(|| "all".to_string());
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(20).clamp(1, 100) as i64;
    let offset = (page as i64 - 1) * limit;

    let mut domain = None;
    let mut stage = None;
    let mut location = None;
    let mut owner_ids: Option<Vec<uuid::Uuid>> = None;

    match feed_type.as_str() {
        "following" => {
            let followed = app_state
                .db_client
                .get_followed_ids(auth.user.id)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?;
            owner_ids = Some(followed);
        }
        "collaborators" => {
            let joined = app_state
                .db_client
                .get_project_ids_for_member(auth.user.id)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?;

            // No joined projects means an empty feed, not an unfiltered one
            if joined.is_empty() {
                return Ok(Json(serde_json::json!({
                    "status": "success",
                    "data": {
                        "projects": [],
                        "recommendations": [],
                        "page": page,
                        "limit": limit
                    }
                })));
            }

            let mut projects = Vec::new();
            for project_id in joined {
                if let Some(project) = app_state
                    .db_client
                    .get_project(project_id)
                    .await
                    .map_err(|e| HttpError::server_error(e.to_string()))?
                {
                    projects.push(project);
                }
            }
            projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));

            return Ok(Json(serde_json::json!({
                "status": "success",
                "data": {
                    "projects": projects,
                    "recommendations": [],
                    "page": page,
                    "limit": limit
                }
            })));
        }
        "domain" => domain = query.domain,
        "location" => location = query.location.clone(),
        "stage" => stage = query.stage,
        _ => {}
    }

    let projects = app_state
        .db_client
        .get_feed_projects(
            domain,
            stage,
            location,
            query.q.clone(),
            owner_ids,
            limit,
            offset,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let recommendations = if feed_type == "all" {
        app_state
            .matching_service
            .recommend_projects_for_user(&auth.user, 5)
            .await
            .map_err(HttpError::from)?
    } else {
        vec![]
    };

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "projects": projects,
            "recommendations": recommendations,
            "page": page,
            "limit": limit
        }
    })))
}

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    pub limit: Option<i64>,
}

/// Tag frequency across recently created projects, most used first.
pub async fn get_trending(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<TrendingQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let limit = query.limit.unwrap_or(20).clamp(1, 100);

    let tags = app_state
        .db_client
        .get_trending_tags(TRENDING_WINDOW_DAYS, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let items: Vec<serde_json::Value> = tags
        .into_iter()
        .map(|(tag, count)| serde_json::json!({ "tag": tag, "count": count }))
        .collect();

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": items
    })))
}
