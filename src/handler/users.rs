use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::{projectdb::ProjectExt, userdb::UserExt},
    dtos::userdtos::*,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/me", get(get_me))
        .route("/check-username", get(check_username_availability))
        .route("/profile", put(update_profile))
        .route("/leaderboard", get(get_leaderboard))
        .route("/notifications", get(get_notifications).put(mark_notifications_read))
        .route("/:username", get(get_user_profile))
        .route("/:username/follow", post(follow_user))
}

pub async fn get_me(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let badges = app_state
        .db_client
        .get_user_badges(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let (followers, following) = app_state
        .db_client
        .get_follower_counts(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let recent_activity = app_state
        .db_client
        .get_reputation_events(user.user.id, 10)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let filtered_user = FilterUserDto::filter_user(&user.user);

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "user": filtered_user,
            "badges": badges,
            "followers_count": followers,
            "following_count": following,
            "recent_activity": recent_activity
        }
    })))
}

pub async fn check_username_availability(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query_params): Query<CheckUsernameQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let username = query_params.username.trim().to_lowercase();

    if username.len() < 3 {
        return Ok(Json(UsernameCheckResponse {
            available: false,
            message: "Username must be at least 3 characters long".to_string(),
        }));
    }

    if username.len() > 30 {
        return Ok(Json(UsernameCheckResponse {
            available: false,
            message: "Username must not exceed 30 characters".to_string(),
        }));
    }

    let valid_username = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
    if !valid_username.is_match(&username) {
        return Ok(Json(UsernameCheckResponse {
            available: false,
            message: "Username can only contain letters, numbers, underscores and hyphens"
                .to_string(),
        }));
    }

    let existing_user = app_state
        .db_client
        .get_user(None, Some(&username), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing_user.is_some() {
        return Ok(Json(UsernameCheckResponse {
            available: false,
            message: "Username is already taken".to_string(),
        }));
    }

    Ok(Json(UsernameCheckResponse {
        available: true,
        message: "Username is available".to_string(),
    }))
}

pub async fn update_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user_id = user.user.id;

    let mut updated_user = app_state
        .db_client
        .update_user_profile(
            user_id,
            body.name,
            body.bio,
            body.location,
            body.city,
            body.state,
            body.country,
            body.college,
            body.website,
            body.avatar_url,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if let Some(skills) = body.skills {
        updated_user = app_state
            .db_client
            .update_user_skills(user_id, skills)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
    }

    let filtered_user = FilterUserDto::filter_user(&updated_user);

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: filtered_user,
        },
    }))
}

pub async fn get_leaderboard(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query_params): Query<RequestQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let limit = query_params.limit.unwrap_or(10);

    let users = app_state
        .db_client
        .get_users_by_reputation(limit as i64)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let leaderboard = FilterUserDto::filter_users(&users);

    let response = UserListResponseDto {
        status: "success".to_string(),
        results: leaderboard.len() as i64,
        users: leaderboard,
    };

    Ok(Json(response))
}

pub async fn get_notifications(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let notifications = app_state
        .db_client
        .get_notifications(user.user.id, 50)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": notifications
    })))
}

pub async fn mark_notifications_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .mark_notifications_read(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Notifications marked as read"
    })))
}

pub async fn get_user_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let profile_user = app_state
        .db_client
        .get_user(None, Some(&username), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    let projects = app_state
        .db_client
        .get_projects_by_owner(profile_user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let (followers, following) = app_state
        .db_client
        .get_follower_counts(profile_user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let is_following = app_state
        .db_client
        .get_follow(auth.user.id, profile_user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .is_some();

    let badges = app_state
        .db_client
        .get_user_badges(profile_user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "user": FilterUserDto::filter_user(&profile_user),
            "projects": projects,
            "badges": badges,
            "followers_count": followers,
            "following_count": following,
            "is_following": is_following,
            "is_own_profile": auth.user.id == profile_user.id
        }
    })))
}

/// Follow or unfollow a user. Calling twice undoes the follow.
pub async fn follow_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let target = app_state
        .db_client
        .get_user(None, Some(&username), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    if target.id == auth.user.id {
        return Err(HttpError::bad_request("Cannot follow yourself"));
    }

    let existing = app_state
        .db_client
        .get_follow(auth.user.id, target.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let action = if existing.is_some() {
        app_state
            .db_client
            .delete_follow(auth.user.id, target.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
        "unfollowed"
    } else {
        app_state
            .db_client
            .create_follow(auth.user.id, target.id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        let _ = app_state
            .notification_service
            .notify_new_follower(target.id, &auth.user.name)
            .await;

        "followed"
    };

    let (followers, following) = app_state
        .db_client
        .get_follower_counts(target.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "action": action,
        "followers_count": followers,
        "following_count": following
    })))
}
