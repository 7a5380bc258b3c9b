// db/chatdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::chatmodel::{Chat, Message};

#[async_trait]
pub trait ChatExt {
    async fn create_or_get_chat(
        &self,
        user_one_id: Uuid,
        user_two_id: Uuid,
        project_id: Option<Uuid>,
    ) -> Result<Chat, Error>;

    async fn get_user_chats(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Chat>, Error>;

    async fn get_chat_by_id(&self, chat_id: Uuid) -> Result<Option<Chat>, Error>;

    async fn send_message(
        &self,
        chat_id: Uuid,
        sender_id: Uuid,
        content: String,
    ) -> Result<Message, Error>;

    async fn get_chat_messages(
        &self,
        chat_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Message>, Error>;

    async fn get_chat_unread_count(&self, chat_id: Uuid, user_id: Uuid) -> Result<i64, Error>;

    async fn mark_messages_as_read(&self, chat_id: Uuid, user_id: Uuid) -> Result<(), Error>;

    async fn get_unread_count(&self, user_id: Uuid) -> Result<i64, Error>;
}

#[async_trait]
impl ChatExt for DBClient {
    async fn create_or_get_chat(
        &self,
        user_one_id: Uuid,
        user_two_id: Uuid,
        project_id: Option<Uuid>,
    ) -> Result<Chat, Error> {
        let existing = sqlx::query_as::<_, Chat>(
            r#"
            SELECT id, participant_one_id, participant_two_id, project_id,
                   last_message_at, created_at
            FROM chats
            WHERE ((participant_one_id = $1 AND participant_two_id = $2)
                OR (participant_one_id = $2 AND participant_two_id = $1))
              AND ($3::uuid IS NULL OR project_id = $3)
            "#,
        )
        .bind(user_one_id)
        .bind(user_two_id)
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(chat) = existing {
            return Ok(chat);
        }

        sqlx::query_as::<_, Chat>(
            r#"
            INSERT INTO chats (participant_one_id, participant_two_id, project_id)
            VALUES ($1, $2, $3)
            RETURNING id, participant_one_id, participant_two_id, project_id,
                      last_message_at, created_at
            "#,
        )
        .bind(user_one_id)
        .bind(user_two_id)
        .bind(project_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_user_chats(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Chat>, Error> {
        sqlx::query_as::<_, Chat>(
            r#"
            SELECT id, participant_one_id, participant_two_id, project_id,
                   last_message_at, created_at
            FROM chats
            WHERE participant_one_id = $1 OR participant_two_id = $1
            ORDER BY last_message_at DESC NULLS LAST, created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_chat_by_id(&self, chat_id: Uuid) -> Result<Option<Chat>, Error> {
        sqlx::query_as::<_, Chat>(
            r#"
            SELECT id, participant_one_id, participant_two_id, project_id,
                   last_message_at, created_at
            FROM chats
            WHERE id = $1
            "#,
        )
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn send_message(
        &self,
        chat_id: Uuid,
        sender_id: Uuid,
        content: String,
    ) -> Result<Message, Error> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (chat_id, sender_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, chat_id, sender_id, content, is_read, read_at, created_at
            "#,
        )
        .bind(chat_id)
        .bind(sender_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        sqlx::query(r#"UPDATE chats SET last_message_at = NOW() WHERE id = $1"#)
            .bind(chat_id)
            .execute(&self.pool)
            .await?;

        Ok(message)
    }

    async fn get_chat_messages(
        &self,
        chat_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Message>, Error> {
        sqlx::query_as::<_, Message>(
            r#"
            SELECT id, chat_id, sender_id, content, is_read, read_at, created_at
            FROM messages
            WHERE chat_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(chat_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_chat_unread_count(&self, chat_id: Uuid, user_id: Uuid) -> Result<i64, Error> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM messages
            WHERE chat_id = $1
              AND sender_id != $2
              AND is_read = false
            "#,
        )
        .bind(chat_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn mark_messages_as_read(&self, chat_id: Uuid, user_id: Uuid) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE messages
            SET is_read = true, read_at = NOW()
            WHERE chat_id = $1
              AND sender_id != $2
              AND is_read = false
            "#,
        )
        .bind(chat_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_unread_count(&self, user_id: Uuid) -> Result<i64, Error> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM messages m
            JOIN chats c ON m.chat_id = c.id
            WHERE (c.participant_one_id = $1 OR c.participant_two_id = $1)
              AND m.sender_id != $1
              AND m.is_read = false
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }
}
