// db/projectdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::projectmodel::{
    CollabStatus, CollaborationRequest, Comment, Domain, Like, MemberRole, Project, ProjectMember,
    ProjectStage, Visibility,
};

#[async_trait]
pub trait ProjectExt {
    #[allow(clippy::too_many_arguments)]
    async fn create_project(
        &self,
        owner_id: Uuid,
        title: String,
        description: String,
        problem_statement: Option<String>,
        domain: Option<Domain>,
        tags: Vec<String>,
        skills_required: Vec<String>,
        stage: ProjectStage,
        visibility: Visibility,
        location: Option<String>,
        city: Option<String>,
        state: Option<String>,
        country: Option<String>,
        cover_image_url: Option<String>,
        demo_video_url: Option<String>,
    ) -> Result<Project, sqlx::Error>;

    async fn get_project(&self, project_id: Uuid) -> Result<Option<Project>, sqlx::Error>;

    async fn get_projects_by_owner(&self, owner_id: Uuid) -> Result<Vec<Project>, sqlx::Error>;

    /// Distinct domains of a user's own projects, the "domain history"
    /// signal used by both matchers.
    async fn get_domains_by_owner(&self, owner_id: Uuid) -> Result<Vec<Domain>, sqlx::Error>;

    async fn update_project_stage(
        &self,
        project_id: Uuid,
        stage: ProjectStage,
    ) -> Result<Project, sqlx::Error>;

    async fn increment_views(&self, project_id: Uuid) -> Result<i32, sqlx::Error>;

    /// Candidate pool for project recommendations: public, open-stage,
    /// not owned by and not joined by the given user.
    async fn get_open_projects_for_user(&self, user_id: Uuid)
        -> Result<Vec<Project>, sqlx::Error>;

    #[allow(clippy::too_many_arguments)]
    async fn get_feed_projects(
        &self,
        domain: Option<Domain>,
        stage: Option<ProjectStage>,
        location: Option<String>,
        search: Option<String>,
        owner_ids: Option<Vec<Uuid>>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>, sqlx::Error>;

    async fn get_trending_tags(
        &self,
        window_days: i32,
        limit: i64,
    ) -> Result<Vec<(String, i64)>, sqlx::Error>;

    // collaboration requests
    async fn get_collab_request(
        &self,
        project_id: Uuid,
        requester_id: Uuid,
    ) -> Result<Option<CollaborationRequest>, sqlx::Error>;

    async fn get_collab_request_by_id(
        &self,
        request_id: Uuid,
    ) -> Result<Option<CollaborationRequest>, sqlx::Error>;

    async fn create_collab_request(
        &self,
        project_id: Uuid,
        requester_id: Uuid,
        role: MemberRole,
        skills: Vec<String>,
        experience: Option<String>,
        message: String,
    ) -> Result<CollaborationRequest, sqlx::Error>;

    async fn set_collab_request_status(
        &self,
        request_id: Uuid,
        status: CollabStatus,
    ) -> Result<CollaborationRequest, sqlx::Error>;

    async fn get_pending_requests_for_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<CollaborationRequest>, sqlx::Error>;

    async fn get_accepted_requests_for_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<CollaborationRequest>, sqlx::Error>;

    // membership
    async fn get_member(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ProjectMember>, sqlx::Error>;

    async fn add_member(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> Result<ProjectMember, sqlx::Error>;

    async fn get_members(&self, project_id: Uuid) -> Result<Vec<ProjectMember>, sqlx::Error>;

    async fn get_project_ids_for_member(&self, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error>;

    // comments & likes
    async fn create_comment(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        content: String,
    ) -> Result<Comment, sqlx::Error>;

    async fn get_comments(&self, project_id: Uuid, limit: i64)
        -> Result<Vec<Comment>, sqlx::Error>;

    async fn get_like(&self, project_id: Uuid, user_id: Uuid)
        -> Result<Option<Like>, sqlx::Error>;

    async fn create_like(&self, project_id: Uuid, user_id: Uuid) -> Result<Like, sqlx::Error>;

    async fn delete_like(&self, project_id: Uuid, user_id: Uuid) -> Result<(), sqlx::Error>;

    async fn adjust_likes_count(&self, project_id: Uuid, delta: i32) -> Result<i32, sqlx::Error>;
}

#[async_trait]
impl ProjectExt for DBClient {
    async fn create_project(
        &self,
        owner_id: Uuid,
        title: String,
        description: String,
        problem_statement: Option<String>,
        domain: Option<Domain>,
        tags: Vec<String>,
        skills_required: Vec<String>,
        stage: ProjectStage,
        visibility: Visibility,
        location: Option<String>,
        city: Option<String>,
        state: Option<String>,
        country: Option<String>,
        cover_image_url: Option<String>,
        demo_video_url: Option<String>,
    ) -> Result<Project, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects
                (owner_id, title, description, problem_statement, domain, tags,
                 skills_required, stage, visibility, location, city, state, country,
                 cover_image_url, demo_video_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING
                id, owner_id, title, description, problem_statement, domain, tags,
                skills_required, stage, visibility, location, city, state, country,
                cover_image_url, demo_video_url, views_count, likes_count,
                created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .bind(problem_statement)
        .bind(domain)
        .bind(tags)
        .bind(skills_required)
        .bind(stage)
        .bind(visibility)
        .bind(location)
        .bind(city)
        .bind(state)
        .bind(country)
        .bind(cover_image_url)
        .bind(demo_video_url)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_project(&self, project_id: Uuid) -> Result<Option<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT
                id, owner_id, title, description, problem_statement, domain, tags,
                skills_required, stage, visibility, location, city, state, country,
                cover_image_url, demo_video_url, views_count, likes_count,
                created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_projects_by_owner(&self, owner_id: Uuid) -> Result<Vec<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT
                id, owner_id, title, description, problem_statement, domain, tags,
                skills_required, stage, visibility, location, city, state, country,
                cover_image_url, demo_video_url, views_count, likes_count,
                created_at, updated_at
            FROM projects
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_domains_by_owner(&self, owner_id: Uuid) -> Result<Vec<Domain>, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT DISTINCT domain
            FROM projects
            WHERE owner_id = $1 AND domain IS NOT NULL
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_project_stage(
        &self,
        project_id: Uuid,
        stage: ProjectStage,
    ) -> Result<Project, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET stage = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, owner_id, title, description, problem_statement, domain, tags,
                skills_required, stage, visibility, location, city, state, country,
                cover_image_url, demo_video_url, views_count, likes_count,
                created_at, updated_at
            "#,
        )
        .bind(project_id)
        .bind(stage)
        .fetch_one(&self.pool)
        .await
    }

    async fn increment_views(&self, project_id: Uuid) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            UPDATE projects
            SET views_count = views_count + 1
            WHERE id = $1
            RETURNING views_count
            "#,
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_open_projects_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT
                id, owner_id, title, description, problem_statement, domain, tags,
                skills_required, stage, visibility, location, city, state, country,
                cover_image_url, demo_video_url, views_count, likes_count,
                created_at, updated_at
            FROM projects
            WHERE visibility = 'public'
              AND stage IN ('idea', 'seeking_collaborators')
              AND owner_id != $1
              AND id NOT IN (SELECT project_id FROM project_members WHERE user_id = $1)
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_feed_projects(
        &self,
        domain: Option<Domain>,
        stage: Option<ProjectStage>,
        location: Option<String>,
        search: Option<String>,
        owner_ids: Option<Vec<Uuid>>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT
                id, owner_id, title, description, problem_statement, domain, tags,
                skills_required, stage, visibility, location, city, state, country,
                cover_image_url, demo_video_url, views_count, likes_count,
                created_at, updated_at
            FROM projects
            WHERE visibility = 'public'
              AND ($1::project_domain IS NULL OR domain = $1)
              AND ($2::project_stage IS NULL OR stage = $2)
              AND ($3::text IS NULL
                   OR location ILIKE '%' || $3 || '%'
                   OR city ILIKE '%' || $3 || '%'
                   OR state ILIKE '%' || $3 || '%'
                   OR country ILIKE '%' || $3 || '%')
              AND ($4::text IS NULL
                   OR title ILIKE '%' || $4 || '%'
                   OR description ILIKE '%' || $4 || '%'
                   OR problem_statement ILIKE '%' || $4 || '%')
              AND ($5::uuid[] IS NULL OR owner_id = ANY($5))
            ORDER BY created_at DESC
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(domain)
        .bind(stage)
        .bind(location)
        .bind(search)
        .bind(owner_ids)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_trending_tags(
        &self,
        window_days: i32,
        limit: i64,
    ) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT tag, COUNT(*) as cnt
            FROM projects, unnest(tags) AS tag
            WHERE created_at > (NOW() - make_interval(days => $1))
            GROUP BY tag
            ORDER BY cnt DESC
            LIMIT $2
            "#,
        )
        .bind(window_days)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_collab_request(
        &self,
        project_id: Uuid,
        requester_id: Uuid,
    ) -> Result<Option<CollaborationRequest>, sqlx::Error> {
        sqlx::query_as::<_, CollaborationRequest>(
            r#"
            SELECT id, project_id, requester_id, role, skills, experience, message,
                   status, created_at
            FROM collaboration_requests
            WHERE project_id = $1 AND requester_id = $2
            "#,
        )
        .bind(project_id)
        .bind(requester_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_collab_request_by_id(
        &self,
        request_id: Uuid,
    ) -> Result<Option<CollaborationRequest>, sqlx::Error> {
        sqlx::query_as::<_, CollaborationRequest>(
            r#"
            SELECT id, project_id, requester_id, role, skills, experience, message,
                   status, created_at
            FROM collaboration_requests
            WHERE id = $1
            "#,
        )
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_collab_request(
        &self,
        project_id: Uuid,
        requester_id: Uuid,
        role: MemberRole,
        skills: Vec<String>,
        experience: Option<String>,
        message: String,
    ) -> Result<CollaborationRequest, sqlx::Error> {
        sqlx::query_as::<_, CollaborationRequest>(
            r#"
            INSERT INTO collaboration_requests
                (project_id, requester_id, role, skills, experience, message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, project_id, requester_id, role, skills, experience, message,
                      status, created_at
            "#,
        )
        .bind(project_id)
        .bind(requester_id)
        .bind(role)
        .bind(skills)
        .bind(experience)
        .bind(message)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_collab_request_status(
        &self,
        request_id: Uuid,
        status: CollabStatus,
    ) -> Result<CollaborationRequest, sqlx::Error> {
        sqlx::query_as::<_, CollaborationRequest>(
            r#"
            UPDATE collaboration_requests
            SET status = $2
            WHERE id = $1
            RETURNING id, project_id, requester_id, role, skills, experience, message,
                      status, created_at
            "#,
        )
        .bind(request_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_pending_requests_for_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<CollaborationRequest>, sqlx::Error> {
        sqlx::query_as::<_, CollaborationRequest>(
            r#"
            SELECT id, project_id, requester_id, role, skills, experience, message,
                   status, created_at
            FROM collaboration_requests
            WHERE project_id = $1 AND status = 'pending'
            ORDER BY created_at DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_accepted_requests_for_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<CollaborationRequest>, sqlx::Error> {
        sqlx::query_as::<_, CollaborationRequest>(
            r#"
            SELECT id, project_id, requester_id, role, skills, experience, message,
                   status, created_at
            FROM collaboration_requests
            WHERE project_id = $1 AND status = 'accepted'
            ORDER BY created_at DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_member(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ProjectMember>, sqlx::Error> {
        sqlx::query_as::<_, ProjectMember>(
            r#"
            SELECT id, project_id, user_id, role, joined_at
            FROM project_members
            WHERE project_id = $1 AND user_id = $2
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn add_member(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> Result<ProjectMember, sqlx::Error> {
        // get-or-create: an existing membership keeps its original role
        sqlx::query_as::<_, ProjectMember>(
            r#"
            INSERT INTO project_members (project_id, user_id, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (project_id, user_id) DO UPDATE
            SET role = project_members.role
            RETURNING id, project_id, user_id, role, joined_at
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_members(&self, project_id: Uuid) -> Result<Vec<ProjectMember>, sqlx::Error> {
        sqlx::query_as::<_, ProjectMember>(
            r#"
            SELECT id, project_id, user_id, role, joined_at
            FROM project_members
            WHERE project_id = $1
            ORDER BY joined_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_project_ids_for_member(&self, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar(r#"SELECT project_id FROM project_members WHERE user_id = $1"#)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn create_comment(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        content: String,
    ) -> Result<Comment, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (project_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, project_id, user_id, content, created_at, updated_at
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_comments(
        &self,
        project_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, project_id, user_id, content, created_at, updated_at
            FROM comments
            WHERE project_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(project_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_like(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Like>, sqlx::Error> {
        sqlx::query_as::<_, Like>(
            r#"
            SELECT id, project_id, user_id, created_at
            FROM likes
            WHERE project_id = $1 AND user_id = $2
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_like(&self, project_id: Uuid, user_id: Uuid) -> Result<Like, sqlx::Error> {
        sqlx::query_as::<_, Like>(
            r#"
            INSERT INTO likes (project_id, user_id)
            VALUES ($1, $2)
            RETURNING id, project_id, user_id, created_at
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_like(&self, project_id: Uuid, user_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(r#"DELETE FROM likes WHERE project_id = $1 AND user_id = $2"#)
            .bind(project_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn adjust_likes_count(&self, project_id: Uuid, delta: i32) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            UPDATE projects
            SET likes_count = GREATEST(0, likes_count + $2)
            WHERE id = $1
            RETURNING likes_count
            "#,
        )
        .bind(project_id)
        .bind(delta)
        .fetch_one(&self.pool)
        .await
    }
}
