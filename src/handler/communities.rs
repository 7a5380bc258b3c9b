use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::communitydb::CommunityExt,
    dtos::communitydtos::{CommunityCreateDto, CommunityListQuery},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::communitymodel::CommunityKind,
    AppState,
};

pub fn communities_handler() -> Router {
    Router::new()
        .route("/", get(list_communities).post(create_community))
        .route("/:community_id", get(get_community_detail))
        .route("/:community_id/join", post(join_community))
        .route("/:community_id/leave", post(leave_community))
}

pub async fn list_communities(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Query(query): Query<CommunityListQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let communities = app_state
        .db_client
        .get_communities(query.kind, query.domain)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut items = Vec::with_capacity(communities.len());
    for (community, member_count) in communities {
        let is_member = app_state
            .db_client
            .is_community_member(community.id, auth.user.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        items.push(serde_json::json!({
            "community": community,
            "member_count": member_count,
            "is_member": is_member
        }));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": items
    })))
}

pub async fn create_community(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CommunityCreateDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let community = app_state
        .db_client
        .create_community(
            auth.user.id,
            body.name,
            body.description,
            body.kind.unwrap_or(CommunityKind::General),
            body.domain,
            body.location,
            body.college,
            body.cover_image_url,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // Creator is automatically a member
    app_state
        .db_client
        .join_community(community.id, auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": community
    })))
}

pub async fn get_community_detail(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(community_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let community = app_state
        .db_client
        .get_community(community_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Community not found"))?;

    let is_member = app_state
        .db_client
        .is_community_member(community.id, auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let member_count = app_state
        .db_client
        .get_community_member_count(community.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let projects = app_state
        .db_client
        .get_community_projects(community.id, 20)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "community": community,
            "is_member": is_member,
            "member_count": member_count,
            "projects": projects
        }
    })))
}

pub async fn join_community(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(community_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let community = app_state
        .db_client
        .get_community(community_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Community not found"))?;

    app_state
        .db_client
        .join_community(community.id, auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": format!("You joined {}!", community.name)
    })))
}

pub async fn leave_community(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(community_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let community = app_state
        .db_client
        .get_community(community_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Community not found"))?;

    app_state
        .db_client
        .leave_community(community.id, auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": format!("You left {}", community.name)
    })))
}
