use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{chatdb::ChatExt, projectdb::ProjectExt, userdb::UserExt},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::chatmodel::{Chat, Message},
    AppState,
};

pub fn chat_handler() -> Router {
    Router::new()
        .route("/chats", get(get_user_chats).post(create_chat))
        .route("/chats/:chat_id", get(get_chat_details))
        .route("/chats/:chat_id/messages", get(get_messages).post(send_message))
        .route("/chats/:chat_id/read", put(mark_chat_as_read))
        .route("/unread-count", get(get_unread_count))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateChatDto {
    pub other_user_id: Uuid,
    pub project_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ChatWithDetails {
    pub chat: Chat,
    pub other_user: ChatParticipant,
    pub last_message: Option<Message>,
    pub unread_count: i64,
}

#[derive(Debug, Serialize, Clone)]
pub struct ChatParticipant {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub avatar_url: Option<String>,
}

pub async fn create_chat(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateChatDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if body.other_user_id == auth.user.id {
        return Err(HttpError::bad_request("Cannot start a chat with yourself"));
    }

    let other_user = app_state
        .db_client
        .get_user(Some(body.other_user_id), None, None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    if let Some(project_id) = body.project_id {
        let _ = app_state
            .db_client
            .get_project(project_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
            .ok_or_else(|| HttpError::not_found("Project not found"))?;
    }

    let chat = app_state
        .db_client
        .create_or_get_chat(auth.user.id, body.other_user_id, body.project_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let response = ChatWithDetails {
        chat: chat.clone(),
        other_user: ChatParticipant {
            id: other_user.id,
            name: other_user.name,
            username: other_user.username,
            avatar_url: other_user.avatar_url,
        },
        last_message: None,
        unread_count: 0,
    };

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": response
    })))
}

pub async fn get_user_chats(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let page = pagination.page.unwrap_or(1);
    let limit = pagination.limit.unwrap_or(20) as i64;
    let offset = ((page - 1) * limit as u32) as i64;

    let chats = app_state
        .db_client
        .get_user_chats(auth.user.id, limit, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let mut chat_details = Vec::new();

    for chat in chats {
        let other_user_id = chat.other_participant(auth.user.id);

        let other_user = app_state
            .db_client
            .get_user(Some(other_user_id), None, None)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
            .ok_or_else(|| HttpError::not_found("User not found"))?;

        let messages = app_state
            .db_client
            .get_chat_messages(chat.id, 1, 0)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        let last_message = messages.first().cloned();

        let unread_count = app_state
            .db_client
            .get_chat_unread_count(chat.id, auth.user.id)
            .await
            .unwrap_or(0);

        chat_details.push(ChatWithDetails {
            chat: chat.clone(),
            other_user: ChatParticipant {
                id: other_user.id,
                name: other_user.name,
                username: other_user.username,
                avatar_url: other_user.avatar_url,
            },
            last_message,
            unread_count,
        });
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": chat_details
    })))
}

pub async fn get_chat_details(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(chat_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let chat = app_state
        .db_client
        .get_chat_by_id(chat_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Chat not found"))?;

    if !chat.has_participant(auth.user.id) {
        return Err(HttpError::unauthorized("Not authorized to view this chat"));
    }

    let other_user_id = chat.other_participant(auth.user.id);

    let other_user = app_state
        .db_client
        .get_user(Some(other_user_id), None, None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "chat": chat,
            "other_user": ChatParticipant {
                id: other_user.id,
                name: other_user.name,
                username: other_user.username,
                avatar_url: other_user.avatar_url
            }
        }
    })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageDto {
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
}

pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(chat_id): Path<Uuid>,
    Json(body): Json<SendMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let chat = app_state
        .db_client
        .get_chat_by_id(chat_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Chat not found"))?;

    if !chat.has_participant(auth.user.id) {
        return Err(HttpError::unauthorized(
            "Not authorized to send message in this chat",
        ));
    }

    let message = app_state
        .db_client
        .send_message(chat_id, auth.user.id, body.content)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let other_user_id = chat.other_participant(auth.user.id);

    let _ = app_state
        .notification_service
        .notify_new_message(other_user_id, &auth.user.name, &message)
        .await;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": message
    })))
}

pub async fn get_messages(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(chat_id): Path<Uuid>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let chat = app_state
        .db_client
        .get_chat_by_id(chat_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Chat not found"))?;

    if !chat.has_participant(auth.user.id) {
        return Err(HttpError::unauthorized(
            "Not authorized to view messages in this chat",
        ));
    }

    let page = pagination.page.unwrap_or(1);
    let limit = pagination.limit.unwrap_or(50) as i64;
    let offset = ((page - 1) * limit as u32) as i64;

    let messages = app_state
        .db_client
        .get_chat_messages(chat_id, limit, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": messages
    })))
}

pub async fn mark_chat_as_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(chat_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let chat = app_state
        .db_client
        .get_chat_by_id(chat_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Chat not found"))?;

    if !chat.has_participant(auth.user.id) {
        return Err(HttpError::unauthorized("Not authorized"));
    }

    app_state
        .db_client
        .mark_messages_as_read(chat_id, auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Messages marked as read"
    })))
}

pub async fn get_unread_count(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let count = app_state
        .db_client
        .get_unread_count(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "unread_count": count
        }
    })))
}
