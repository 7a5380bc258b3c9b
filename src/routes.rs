// routes.rs
use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use tower_http::trace::TraceLayer;
use serde_json::json;

use crate::{
    handler::{
        ai::ai_handler, auth::auth_handler, chat::chat_handler, communities::communities_handler,
        feed::feed_handler, projects::projects_handler, users::users_handler,
        workspace::workspace_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/users", users_handler().layer(middleware::from_fn(auth)))
        .nest("/projects", projects_handler().layer(middleware::from_fn(auth)))
        .nest("/workspaces", workspace_handler().layer(middleware::from_fn(auth)))
        .nest("/feed", feed_handler().layer(middleware::from_fn(auth)))
        .nest("/chat", chat_handler().layer(middleware::from_fn(auth)))
        .nest("/communities", communities_handler().layer(middleware::from_fn(auth)))
        .nest("/ai", ai_handler().layer(middleware::from_fn(auth)))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
