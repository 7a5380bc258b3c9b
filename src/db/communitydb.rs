// db/communitydb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::{
    communitymodel::{Community, CommunityKind},
    projectmodel::{Domain, Project},
};

#[async_trait]
pub trait CommunityExt {
    #[allow(clippy::too_many_arguments)]
    async fn create_community(
        &self,
        created_by: Uuid,
        name: String,
        description: String,
        kind: CommunityKind,
        domain: Option<Domain>,
        location: Option<String>,
        college: Option<String>,
        cover_image_url: Option<String>,
    ) -> Result<Community, sqlx::Error>;

    async fn get_community(&self, community_id: Uuid) -> Result<Option<Community>, sqlx::Error>;

    /// Ordered by member count, then recency.
    async fn get_communities(
        &self,
        kind: Option<CommunityKind>,
        domain: Option<Domain>,
    ) -> Result<Vec<(Community, i64)>, sqlx::Error>;

    async fn is_community_member(
        &self,
        community_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error>;

    async fn join_community(&self, community_id: Uuid, user_id: Uuid)
        -> Result<(), sqlx::Error>;

    async fn leave_community(
        &self,
        community_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), sqlx::Error>;

    async fn get_community_member_count(&self, community_id: Uuid) -> Result<i64, sqlx::Error>;

    /// Recent projects posted by members of the community.
    async fn get_community_projects(
        &self,
        community_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Project>, sqlx::Error>;
}

#[async_trait]
impl CommunityExt for DBClient {
    async fn create_community(
        &self,
        created_by: Uuid,
        name: String,
        description: String,
        kind: CommunityKind,
        domain: Option<Domain>,
        location: Option<String>,
        college: Option<String>,
        cover_image_url: Option<String>,
    ) -> Result<Community, sqlx::Error> {
        sqlx::query_as::<_, Community>(
            r#"
            INSERT INTO communities
                (created_by, name, description, kind, domain, location, college, cover_image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, description, kind, domain, location, college,
                      cover_image_url, created_by, created_at
            "#,
        )
        .bind(created_by)
        .bind(name)
        .bind(description)
        .bind(kind)
        .bind(domain)
        .bind(location)
        .bind(college)
        .bind(cover_image_url)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_community(&self, community_id: Uuid) -> Result<Option<Community>, sqlx::Error> {
        sqlx::query_as::<_, Community>(
            r#"
            SELECT id, name, description, kind, domain, location, college,
                   cover_image_url, created_by, created_at
            FROM communities
            WHERE id = $1
            "#,
        )
        .bind(community_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_communities(
        &self,
        kind: Option<CommunityKind>,
        domain: Option<Domain>,
    ) -> Result<Vec<(Community, i64)>, sqlx::Error> {
        let rows = sqlx::query_as::<_, CommunityWithCount>(
            r#"
            SELECT c.id, c.name, c.description, c.kind, c.domain, c.location, c.college,
                   c.cover_image_url, c.created_by, c.created_at,
                   COUNT(cm.id) as member_count
            FROM communities c
            LEFT JOIN community_members cm ON cm.community_id = c.id
            WHERE ($1::community_kind IS NULL OR c.kind = $1)
              AND ($2::project_domain IS NULL OR c.domain = $2)
            GROUP BY c.id
            ORDER BY member_count DESC, c.created_at DESC
            "#,
        )
        .bind(kind)
        .bind(domain)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let count = row.member_count;
                (row.into_community(), count)
            })
            .collect())
    }

    async fn is_community_member(
        &self,
        community_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM community_members WHERE community_id = $1 AND user_id = $2"#,
        )
        .bind(community_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    async fn join_community(&self, community_id: Uuid, user_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO community_members (community_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (community_id, user_id) DO NOTHING
            "#,
        )
        .bind(community_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn leave_community(&self, community_id: Uuid, user_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(r#"DELETE FROM community_members WHERE community_id = $1 AND user_id = $2"#)
            .bind(community_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_community_member_count(&self, community_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(r#"SELECT COUNT(*) FROM community_members WHERE community_id = $1"#)
            .bind(community_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_community_projects(
        &self,
        community_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT
                p.id, p.owner_id, p.title, p.description, p.problem_statement, p.domain,
                p.tags, p.skills_required, p.stage, p.visibility, p.location, p.city,
                p.state, p.country, p.cover_image_url, p.demo_video_url,
                p.views_count, p.likes_count, p.created_at, p.updated_at
            FROM projects p
            JOIN community_members cm ON cm.user_id = p.owner_id
            WHERE cm.community_id = $1 AND p.visibility = 'public'
            ORDER BY p.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(community_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CommunityWithCount {
    id: Uuid,
    name: String,
    description: String,
    kind: CommunityKind,
    domain: Option<Domain>,
    location: Option<String>,
    college: Option<String>,
    cover_image_url: Option<String>,
    created_by: Uuid,
    created_at: chrono::DateTime<chrono::Utc>,
    member_count: i64,
}

impl CommunityWithCount {
    fn into_community(self) -> Community {
        Community {
            id: self.id,
            name: self.name,
            description: self.description,
            kind: self.kind,
            domain: self.domain,
            location: self.location,
            college: self.college,
            cover_image_url: self.cover_image_url,
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }
}
