use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{projectdb::ProjectExt, workspacedb::WorkspaceExt},
    dtos::workspacedtos::*,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::{
        projectmodel::{MemberRole, Project},
        workspacemodel::{FileKind, TaskPriority, TaskStatus},
    },
    service::suggestion_service::suggest_next_steps,
    AppState,
};

pub fn workspace_handler() -> Router {
    Router::new()
        .route("/:project_id", get(get_dashboard))
        .route("/:project_id/notes", get(get_notes).post(create_note))
        .route("/:project_id/tasks", get(get_tasks).post(create_task))
        .route("/:project_id/tasks/:task_id/status", put(update_task_status))
        .route("/:project_id/files", get(get_files).post(create_file))
        .route("/:project_id/chat", get(get_chat).post(send_chat_message))
        .route("/:project_id/milestones", post(create_milestone))
        .route("/:project_id/milestones/:milestone_id/complete", put(complete_milestone))
}

async fn load_project_for_member(
    app_state: &AppState,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<(Project, bool), HttpError> {
    let project = app_state
        .db_client
        .get_project(project_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Project not found"))?;

    let is_owner = project.owner_id == user_id;
    let is_member = app_state
        .db_client
        .get_member(project.id, user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .is_some();

    if !(is_member || is_owner) {
        return Err(HttpError::unauthorized(
            "You don't have access to this workspace",
        ));
    }

    Ok((project, is_owner))
}

/// Workspace dashboard. Creates the workspace if a crash between project
/// and workspace writes left it missing, and backfills memberships for
/// the owner and any accepted collaborators.
pub async fn get_dashboard(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let (project, is_owner) = load_project_for_member(&app_state, project_id, auth.user.id).await?;

    let workspace = app_state
        .db_client
        .get_or_create_workspace(project.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state
        .db_client
        .add_member(project.id, project.owner_id, MemberRole::Owner)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let accepted = app_state
        .db_client
        .get_accepted_requests_for_project(project.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    for request in accepted {
        app_state
            .db_client
            .add_member(project.id, request.requester_id, request.role)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
    }

    let members = app_state
        .db_client
        .get_members(project.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let tasks = app_state
        .db_client
        .get_tasks(workspace.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let milestones = app_state
        .db_client
        .get_milestones(workspace.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let notes = app_state
        .db_client
        .get_notes(workspace.id, 5)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let recent_files = app_state
        .db_client
        .get_files(workspace.id, 5)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let recent_chat = app_state
        .db_client
        .get_workspace_messages(workspace.id, 10)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let suggestions = suggest_next_steps(
        &project,
        members.len() as i64,
        &tasks,
        &milestones,
        Utc::now(),
    );

    let suggested_collaborators = if is_owner {
        app_state
            .matching_service
            .find_collaborators_for_project(&project, 5)
            .await
            .map_err(HttpError::from)?
    } else {
        vec![]
    };

    let recent_tasks: Vec<_> = tasks.iter().take(10).collect();
    let next_milestones: Vec<_> = milestones.iter().take(5).collect();

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "project": project,
            "workspace": workspace,
            "members": members,
            "tasks": recent_tasks,
            "milestones": next_milestones,
            "notes": notes,
            "recent_files": recent_files,
            "recent_chat": recent_chat,
            "suggestions": suggestions,
            "suggested_collaborators": suggested_collaborators,
            "is_owner": is_owner
        }
    })))
}

pub async fn get_notes(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let (project, _) = load_project_for_member(&app_state, project_id, auth.user.id).await?;

    let workspace = app_state
        .db_client
        .get_or_create_workspace(project.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let notes = app_state
        .db_client
        .get_notes(workspace.id, 100)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": notes
    })))
}

pub async fn create_note(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
    Json(body): Json<NoteCreateDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let (project, _) = load_project_for_member(&app_state, project_id, auth.user.id).await?;

    let workspace = app_state
        .db_client
        .get_or_create_workspace(project.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let note = app_state
        .db_client
        .create_note(workspace.id, auth.user.id, body.title, body.content)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": note
    })))
}

/// Kanban view: tasks grouped by status.
pub async fn get_tasks(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let (project, _) = load_project_for_member(&app_state, project_id, auth.user.id).await?;

    let workspace = app_state
        .db_client
        .get_or_create_workspace(project.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let tasks = app_state
        .db_client
        .get_tasks(workspace.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let todo: Vec<_> = tasks.iter().filter(|t| t.status == TaskStatus::Todo).collect();
    let in_progress: Vec<_> = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::InProgress)
        .collect();
    let review: Vec<_> = tasks.iter().filter(|t| t.status == TaskStatus::Review).collect();
    let done: Vec<_> = tasks.iter().filter(|t| t.status == TaskStatus::Done).collect();

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "todo": todo,
            "in_progress": in_progress,
            "review": review,
            "done": done
        }
    })))
}

pub async fn create_task(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
    Json(body): Json<TaskCreateDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let (project, _) = load_project_for_member(&app_state, project_id, auth.user.id).await?;

    // Tasks may only be assigned to workspace members
    if let Some(assignee) = body.assigned_to {
        let is_member = app_state
            .db_client
            .get_member(project.id, assignee)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
            .is_some();

        if !is_member && assignee != project.owner_id {
            return Err(HttpError::bad_request(
                "Assignee must be a member of this project",
            ));
        }
    }

    let workspace = app_state
        .db_client
        .get_or_create_workspace(project.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let task = app_state
        .db_client
        .create_task(
            workspace.id,
            auth.user.id,
            body.title,
            body.description,
            body.priority.unwrap_or(TaskPriority::Medium),
            body.assigned_to,
            body.due_date,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": task
    })))
}

pub async fn update_task_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<TaskStatusUpdateDto>,
) -> Result<impl IntoResponse, HttpError> {
    let (project, _) = load_project_for_member(&app_state, project_id, auth.user.id).await?;

    let task = app_state
        .db_client
        .get_task(task_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Task not found"))?;

    let workspace = app_state
        .db_client
        .get_workspace(project.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Workspace not found"))?;

    if task.workspace_id != workspace.id {
        return Err(HttpError::not_found("Task not found"));
    }

    let updated = app_state
        .db_client
        .update_task_status(task.id, body.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": updated
    })))
}

pub async fn get_files(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let (project, _) = load_project_for_member(&app_state, project_id, auth.user.id).await?;

    let workspace = app_state
        .db_client
        .get_or_create_workspace(project.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let files = app_state
        .db_client
        .get_files(workspace.id, 100)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": files
    })))
}

pub async fn create_file(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
    Json(body): Json<FileCreateDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let (project, _) = load_project_for_member(&app_state, project_id, auth.user.id).await?;

    let workspace = app_state
        .db_client
        .get_or_create_workspace(project.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let file = app_state
        .db_client
        .create_file(
            workspace.id,
            auth.user.id,
            body.name,
            body.kind.unwrap_or(FileKind::Other),
            body.url,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": file
    })))
}

pub async fn get_chat(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let (project, _) = load_project_for_member(&app_state, project_id, auth.user.id).await?;

    let workspace = app_state
        .db_client
        .get_or_create_workspace(project.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let messages = app_state
        .db_client
        .get_workspace_messages(workspace.id, 200)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": messages
    })))
}

pub async fn send_chat_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
    Json(body): Json<WorkspaceMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let (project, _) = load_project_for_member(&app_state, project_id, auth.user.id).await?;

    let workspace = app_state
        .db_client
        .get_or_create_workspace(project.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let message = app_state
        .db_client
        .create_workspace_message(workspace.id, auth.user.id, body.body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": message
    })))
}

pub async fn create_milestone(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
    Json(body): Json<MilestoneCreateDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let (project, _) = load_project_for_member(&app_state, project_id, auth.user.id).await?;

    let workspace = app_state
        .db_client
        .get_or_create_workspace(project.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let milestone = app_state
        .db_client
        .create_milestone(workspace.id, body.title, body.description, body.due_date)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": milestone
    })))
}

pub async fn complete_milestone(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path((project_id, milestone_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpError> {
    let (project, _) = load_project_for_member(&app_state, project_id, auth.user.id).await?;

    let milestone = app_state
        .db_client
        .get_milestone(milestone_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Milestone not found"))?;

    let workspace = app_state
        .db_client
        .get_workspace(project.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Workspace not found"))?;

    if milestone.workspace_id != workspace.id {
        return Err(HttpError::not_found("Milestone not found"));
    }

    let updated = app_state
        .db_client
        .complete_milestone(milestone.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": updated
    })))
}
