use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{projectdb::ProjectExt, userdb::UserExt, workspacedb::WorkspaceExt},
    dtos::projectdtos::*,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::projectmodel::{CollabStatus, MemberRole, ProjectStage, Visibility},
    service::reputation_service::{COLLABORATION_ACCEPTED_POINTS, PROJECT_CREATED_POINTS},
    AppState,
};

pub fn projects_handler() -> Router {
    Router::new()
        .route("/", post(create_project))
        .route("/:project_id", get(get_project_detail))
        .route("/:project_id/stage", put(update_stage))
        .route("/:project_id/like", post(like_project))
        .route("/:project_id/comments", get(get_comments).post(add_comment))
        .route("/:project_id/collaborate", post(request_collaboration))
        .route("/collaboration/:request_id/respond", put(respond_collaboration))
}

/// Create a project. Project, workspace, and owner membership are three
/// separate writes; if a later one fails the earlier ones stand, and the
/// workspace dashboard recreates whatever is missing.
pub async fn create_project(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateProjectDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let project = app_state
        .db_client
        .create_project(
            auth.user.id,
            body.title,
            body.description,
            body.problem_statement,
            body.domain,
            body.tags,
            body.skills_required,
            body.stage.unwrap_or(ProjectStage::Idea),
            body.visibility.unwrap_or(Visibility::Public),
            body.location,
            body.city,
            body.state,
            body.country,
            body.cover_image_url,
            body.demo_video_url,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let workspace = app_state
        .db_client
        .get_or_create_workspace(project.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state
        .db_client
        .add_member(project.id, auth.user.id, MemberRole::Owner)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let _ = app_state
        .reputation_service
        .record_contribution(&auth.user)
        .await;

    let _ = app_state
        .reputation_service
        .award_points(
            auth.user.id,
            PROJECT_CREATED_POINTS,
            "project_created",
            format!("Created project {}", project.id),
        )
        .await;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "project": project,
            "workspace": workspace
        }
    })))
}

pub async fn get_project_detail(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let mut project = app_state
        .db_client
        .get_project(project_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Project not found"))?;

    let is_owner = project.owner_id == auth.user.id;
    let membership = app_state
        .db_client
        .get_member(project.id, auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if project.visibility == Visibility::Private && !is_owner && membership.is_none() {
        return Err(HttpError::unauthorized("This project is private"));
    }

    project.views_count = app_state
        .db_client
        .increment_views(project.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let comments = app_state
        .db_client
        .get_comments(project.id, 20)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let members = app_state
        .db_client
        .get_members(project.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let has_requested = app_state
        .db_client
        .get_collab_request(project.id, auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .is_some();

    let can_collaborate = !is_owner
        && membership.is_none()
        && matches!(
            project.stage,
            ProjectStage::Idea | ProjectStage::SeekingCollaborators
        );

    let is_liked = app_state
        .db_client
        .get_like(project.id, auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .is_some();

    // Pending requests and collaborator suggestions are owner-only
    let pending_requests = if is_owner {
        app_state
            .db_client
            .get_pending_requests_for_project(project.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
    } else {
        vec![]
    };

    let suggested_collaborators = if is_owner {
        app_state
            .matching_service
            .find_collaborators_for_project(&project, 5)
            .await
            .map_err(HttpError::from)?
    } else {
        vec![]
    };

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "project": project,
            "comments": comments,
            "members": members,
            "can_collaborate": can_collaborate,
            "has_requested": has_requested,
            "is_liked": is_liked,
            "pending_requests": pending_requests,
            "suggested_collaborators": suggested_collaborators
        }
    })))
}

pub async fn update_stage(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
    Json(body): Json<StageUpdateDto>,
) -> Result<impl IntoResponse, HttpError> {
    let project = app_state
        .db_client
        .get_project(project_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Project not found"))?;

    if project.owner_id != auth.user.id {
        return Err(HttpError::unauthorized(
            "Only the project owner can change the stage",
        ));
    }

    let updated = app_state
        .db_client
        .update_project_stage(project_id, body.stage)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": updated
    })))
}

/// Like or unlike a project. The counter never goes below zero.
pub async fn like_project(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let project = app_state
        .db_client
        .get_project(project_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Project not found"))?;

    let existing = app_state
        .db_client
        .get_like(project.id, auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let (action, likes_count) = if existing.is_some() {
        app_state
            .db_client
            .delete_like(project.id, auth.user.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
        let count = app_state
            .db_client
            .adjust_likes_count(project.id, -1)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
        ("unliked", count)
    } else {
        app_state
            .db_client
            .create_like(project.id, auth.user.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
        let count = app_state
            .db_client
            .adjust_likes_count(project.id, 1)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
        ("liked", count)
    };

    Ok(Json(serde_json::json!({
        "status": "success",
        "action": action,
        "likes_count": likes_count
    })))
}

pub async fn get_comments(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let comments = app_state
        .db_client
        .get_comments(project_id, 100)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": comments
    })))
}

pub async fn add_comment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
    Json(body): Json<CommentCreateDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let project = app_state
        .db_client
        .get_project(project_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Project not found"))?;

    let comment = app_state
        .db_client
        .create_comment(project.id, auth.user.id, body.content)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if project.owner_id != auth.user.id {
        let _ = app_state
            .notification_service
            .notify_new_comment(project.owner_id, &auth.user.name, &project)
            .await;
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": comment
    })))
}

/// One collaboration request per (project, requester). A declined request
/// can be re-opened; anything else is a conflict.
pub async fn request_collaboration(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
    Json(body): Json<CollaborationRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let project = app_state
        .db_client
        .get_project(project_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Project not found"))?;

    if project.owner_id == auth.user.id {
        return Err(HttpError::bad_request(
            "You cannot request to join your own project",
        ));
    }

    let existing = app_state
        .db_client
        .get_collab_request(project.id, auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let request = match existing {
        Some(request) if request.status == CollabStatus::Declined => app_state
            .db_client
            .set_collab_request_status(request.id, CollabStatus::Pending)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?,
        Some(_) => {
            return Err(HttpError::unique_constraint_violation(
                "You have already requested to collaborate on this project",
            ));
        }
        None => app_state
            .db_client
            .create_collab_request(
                project.id,
                auth.user.id,
                body.role.unwrap_or(MemberRole::Developer),
                body.skills,
                body.experience,
                body.message,
            )
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?,
    };

    let _ = app_state
        .notification_service
        .notify_collaboration_request(project.owner_id, &auth.user.name, &project)
        .await;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": request
    })))
}

/// Accept or decline a collaboration request. Accepting adds the requester
/// as a member and makes sure the workspace and owner membership exist.
pub async fn respond_collaboration(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(request_id): Path<Uuid>,
    Json(body): Json<RespondCollabDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if body.action != "accept" && body.action != "decline" {
        return Err(HttpError::bad_request(
            "Action must be 'accept' or 'decline'",
        ));
    }

    let request = app_state
        .db_client
        .get_collab_request_by_id(request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Request not found"))?;

    let project = app_state
        .db_client
        .get_project(request.project_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Project not found"))?;

    if project.owner_id != auth.user.id {
        return Err(HttpError::unauthorized(
            "Only the project owner can respond to requests",
        ));
    }

    if body.action == "accept" {
        let updated = app_state
            .db_client
            .set_collab_request_status(request.id, CollabStatus::Accepted)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        app_state
            .db_client
            .add_member(project.id, request.requester_id, request.role)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        app_state
            .db_client
            .get_or_create_workspace(project.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        app_state
            .db_client
            .add_member(project.id, project.owner_id, MemberRole::Owner)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        let _ = app_state
            .notification_service
            .notify_request_accepted(request.requester_id, &project)
            .await;

        let _ = app_state
            .reputation_service
            .award_points(
                request.requester_id,
                COLLABORATION_ACCEPTED_POINTS,
                "collaboration_accepted",
                format!("Joined project {}", project.id),
            )
            .await;

        if let Ok(Some(requester)) = app_state
            .db_client
            .get_user(Some(request.requester_id), None, None)
            .await
        {
            let _ = app_state
                .reputation_service
                .record_contribution(&requester)
                .await;
        }

        Ok(Json(serde_json::json!({
            "status": "success",
            "data": updated
        })))
    } else {
        let updated = app_state
            .db_client
            .set_collab_request_status(request.id, CollabStatus::Declined)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        let _ = app_state
            .notification_service
            .notify_request_declined(request.requester_id, &project)
            .await;

        Ok(Json(serde_json::json!({
            "status": "success",
            "data": updated
        })))
    }
}
