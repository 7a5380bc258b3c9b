// service/notification_service.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::db::DBClient,
    models::{chatmodel::Message, projectmodel::Project},
    service::error::ServiceError,
};

#[derive(Debug, Clone)]
pub struct NotificationService {
    db_client: Arc<DBClient>,
}

impl NotificationService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn notify_collaboration_request(
        &self,
        owner_id: Uuid,
        requester_name: &str,
        project: &Project,
    ) -> Result<(), ServiceError> {
        tracing::info!(
            "Collaboration request notification: {} -> project {}",
            requester_name,
            project.id
        );

        self.store_notification(
            owner_id,
            "collaboration_request",
            Some(project.id),
            Some(serde_json::json!({
                "project_title": project.title,
                "requester_name": requester_name,
            })),
            format!("{} wants to join {}", requester_name, project.title),
        )
        .await
    }

    pub async fn notify_request_accepted(
        &self,
        requester_id: Uuid,
        project: &Project,
    ) -> Result<(), ServiceError> {
        self.store_notification(
            requester_id,
            "collaboration_accepted",
            Some(project.id),
            Some(serde_json::json!({ "project_title": project.title })),
            format!("You've been added to {}", project.title),
        )
        .await
    }

    pub async fn notify_request_declined(
        &self,
        requester_id: Uuid,
        project: &Project,
    ) -> Result<(), ServiceError> {
        self.store_notification(
            requester_id,
            "collaboration_declined",
            Some(project.id),
            None,
            format!("Your request to join {} was declined", project.title),
        )
        .await
    }

    pub async fn notify_new_comment(
        &self,
        owner_id: Uuid,
        commenter_name: &str,
        project: &Project,
    ) -> Result<(), ServiceError> {
        self.store_notification(
            owner_id,
            "new_comment",
            Some(project.id),
            Some(serde_json::json!({
                "project_title": project.title,
                "commenter_name": commenter_name,
            })),
            format!("{} commented on {}", commenter_name, project.title),
        )
        .await
    }

    pub async fn notify_new_follower(
        &self,
        user_id: Uuid,
        follower_name: &str,
    ) -> Result<(), ServiceError> {
        self.store_notification(
            user_id,
            "new_follower",
            None,
            None,
            format!("{} started following you", follower_name),
        )
        .await
    }

    pub async fn notify_new_message(
        &self,
        recipient_id: Uuid,
        sender_name: &str,
        message: &Message,
    ) -> Result<(), ServiceError> {
        self.store_notification(
            recipient_id,
            "new_message",
            Some(message.chat_id),
            None,
            format!("New message from {}", sender_name),
        )
        .await
    }

    async fn store_notification(
        &self,
        user_id: Uuid,
        kind: &str,
        reference_id: Option<Uuid>,
        metadata: Option<serde_json::Value>,
        message: String,
    ) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO notifications (user_id, kind, reference_id, metadata, message)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user_id)
        .bind(kind)
        .bind(reference_id)
        .bind(metadata)
        .bind(message)
        .execute(&self.db_client.pool)
        .await
        .map_err(|e| ServiceError::Notification(e.to_string()))?;

        Ok(())
    }
}
