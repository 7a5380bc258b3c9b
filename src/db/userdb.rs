// db/userdb.rs
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::types::Json;
use std::collections::HashMap;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::{
    badgemodel::{Badge, Notification, ReputationEvent},
    projectmodel::Follow,
    usermodel::{SkillLevel, User},
};

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn save_user<T: Into<String> + Send>(
        &self,
        name: T,
        username: T,
        email: T,
        password: T,
    ) -> Result<User, sqlx::Error>;

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        name: Option<String>,
        bio: Option<String>,
        location: Option<String>,
        city: Option<String>,
        state: Option<String>,
        country: Option<String>,
        college: Option<String>,
        website: Option<String>,
        avatar_url: Option<String>,
    ) -> Result<User, sqlx::Error>;

    async fn update_user_skills(
        &self,
        user_id: Uuid,
        skills: HashMap<String, SkillLevel>,
    ) -> Result<User, sqlx::Error>;

    async fn set_contribution_streak(
        &self,
        user_id: Uuid,
        streak: i32,
        last_contribution_date: NaiveDate,
    ) -> Result<User, sqlx::Error>;

    async fn get_users_by_reputation(&self, limit: i64) -> Result<Vec<User>, sqlx::Error>;

    /// Candidate pool for collaborator matching: everyone but the owner.
    async fn get_users_except(&self, user_id: Uuid) -> Result<Vec<User>, sqlx::Error>;

    // follow graph
    async fn get_follow(
        &self,
        follower_id: Uuid,
        following_id: Uuid,
    ) -> Result<Option<Follow>, sqlx::Error>;

    async fn create_follow(
        &self,
        follower_id: Uuid,
        following_id: Uuid,
    ) -> Result<Follow, sqlx::Error>;

    async fn delete_follow(&self, follower_id: Uuid, following_id: Uuid)
        -> Result<(), sqlx::Error>;

    async fn get_follower_counts(&self, user_id: Uuid) -> Result<(i64, i64), sqlx::Error>;

    async fn get_followed_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error>;

    // gamification
    async fn get_user_badges(&self, user_id: Uuid) -> Result<Vec<Badge>, sqlx::Error>;

    async fn get_reputation_events(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ReputationEvent>, sqlx::Error>;

    // notifications
    async fn get_notifications(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Notification>, sqlx::Error>;

    async fn mark_notifications_read(&self, user_id: Uuid) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut user: Option<User> = None;

        if let Some(user_id) = user_id {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT
                    id, name, username, email, password,
                    bio, location, city, state, country, college, website, avatar_url,
                    skills, reputation_points, contribution_streak, last_contribution_date,
                    created_at, updated_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(username) = username {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT
                    id, name, username, email, password,
                    bio, location, city, state, country, college, website, avatar_url,
                    skills, reputation_points, contribution_streak, last_contribution_date,
                    created_at, updated_at
                FROM users
                WHERE username = $1
                "#,
            )
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(email) = email {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT
                    id, name, username, email, password,
                    bio, location, city, state, country, college, website, avatar_url,
                    skills, reputation_points, contribution_streak, last_contribution_date,
                    created_at, updated_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(user)
    }

    async fn save_user<T: Into<String> + Send>(
        &self,
        name: T,
        username: T,
        email: T,
        password: T,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, username, email, password)
            VALUES ($1, $2, $3, $4)
            RETURNING
                id, name, username, email, password,
                bio, location, city, state, country, college, website, avatar_url,
                skills, reputation_points, contribution_streak, last_contribution_date,
                created_at, updated_at
            "#,
        )
        .bind(name.into())
        .bind(username.into())
        .bind(email.into())
        .bind(password.into())
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        name: Option<String>,
        bio: Option<String>,
        location: Option<String>,
        city: Option<String>,
        state: Option<String>,
        country: Option<String>,
        college: Option<String>,
        website: Option<String>,
        avatar_url: Option<String>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                bio = COALESCE($3, bio),
                location = COALESCE($4, location),
                city = COALESCE($5, city),
                state = COALESCE($6, state),
                country = COALESCE($7, country),
                college = COALESCE($8, college),
                website = COALESCE($9, website),
                avatar_url = COALESCE($10, avatar_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, name, username, email, password,
                bio, location, city, state, country, college, website, avatar_url,
                skills, reputation_points, contribution_streak, last_contribution_date,
                created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(bio)
        .bind(location)
        .bind(city)
        .bind(state)
        .bind(country)
        .bind(college)
        .bind(website)
        .bind(avatar_url)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_skills(
        &self,
        user_id: Uuid,
        skills: HashMap<String, SkillLevel>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET skills = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, name, username, email, password,
                bio, location, city, state, country, college, website, avatar_url,
                skills, reputation_points, contribution_streak, last_contribution_date,
                created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(Json(skills))
        .fetch_one(&self.pool)
        .await
    }

    async fn set_contribution_streak(
        &self,
        user_id: Uuid,
        streak: i32,
        last_contribution_date: NaiveDate,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET contribution_streak = $2, last_contribution_date = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, name, username, email, password,
                bio, location, city, state, country, college, website, avatar_url,
                skills, reputation_points, contribution_streak, last_contribution_date,
                created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(streak)
        .bind(last_contribution_date)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_users_by_reputation(&self, limit: i64) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT
                id, name, username, email, password,
                bio, location, city, state, country, college, website, avatar_url,
                skills, reputation_points, contribution_streak, last_contribution_date,
                created_at, updated_at
            FROM users
            ORDER BY reputation_points DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_users_except(&self, user_id: Uuid) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT
                id, name, username, email, password,
                bio, location, city, state, country, college, website, avatar_url,
                skills, reputation_points, contribution_streak, last_contribution_date,
                created_at, updated_at
            FROM users
            WHERE id != $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_follow(
        &self,
        follower_id: Uuid,
        following_id: Uuid,
    ) -> Result<Option<Follow>, sqlx::Error> {
        sqlx::query_as::<_, Follow>(
            r#"
            SELECT id, follower_id, following_id, created_at
            FROM follows
            WHERE follower_id = $1 AND following_id = $2
            "#,
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_follow(
        &self,
        follower_id: Uuid,
        following_id: Uuid,
    ) -> Result<Follow, sqlx::Error> {
        sqlx::query_as::<_, Follow>(
            r#"
            INSERT INTO follows (follower_id, following_id)
            VALUES ($1, $2)
            RETURNING id, follower_id, following_id, created_at
            "#,
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_follow(
        &self,
        follower_id: Uuid,
        following_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            DELETE FROM follows
            WHERE follower_id = $1 AND following_id = $2
            "#,
        )
        .bind(follower_id)
        .bind(following_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_follower_counts(&self, user_id: Uuid) -> Result<(i64, i64), sqlx::Error> {
        let followers: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM follows WHERE following_id = $1"#)
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        let following: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM follows WHERE follower_id = $1"#)
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok((followers, following))
    }

    async fn get_followed_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar(r#"SELECT following_id FROM follows WHERE follower_id = $1"#)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_user_badges(&self, user_id: Uuid) -> Result<Vec<Badge>, sqlx::Error> {
        sqlx::query_as::<_, Badge>(
            r#"
            SELECT b.id, b.name, b.description, b.icon, b.points_required
            FROM user_badges ub
            JOIN badges b ON ub.badge_id = b.id
            WHERE ub.user_id = $1
            ORDER BY ub.earned_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_reputation_events(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ReputationEvent>, sqlx::Error> {
        sqlx::query_as::<_, ReputationEvent>(
            r#"
            SELECT id, user_id, category, points, reason, created_at
            FROM reputation_events
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_notifications(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, user_id, kind, reference_id, metadata, message, is_read, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn mark_notifications_read(&self, user_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = true
            WHERE user_id = $1 AND is_read = false
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
