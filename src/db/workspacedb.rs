// db/workspacedb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::DBClient;

use crate::models::workspacemodel::{
    FileKind, Milestone, Task, TaskPriority, TaskStatus, Workspace, WorkspaceFile,
    WorkspaceMessage, WorkspaceNote,
};

#[async_trait]
pub trait WorkspaceExt {
    /// Lazily creates the workspace if the project doesn't have one yet.
    async fn get_or_create_workspace(&self, project_id: Uuid) -> Result<Workspace, sqlx::Error>;

    async fn get_workspace(&self, project_id: Uuid) -> Result<Option<Workspace>, sqlx::Error>;

    // notes
    async fn create_note(
        &self,
        workspace_id: Uuid,
        author_id: Uuid,
        title: String,
        content: String,
    ) -> Result<WorkspaceNote, sqlx::Error>;

    async fn get_notes(
        &self,
        workspace_id: Uuid,
        limit: i64,
    ) -> Result<Vec<WorkspaceNote>, sqlx::Error>;

    // tasks
    #[allow(clippy::too_many_arguments)]
    async fn create_task(
        &self,
        workspace_id: Uuid,
        created_by: Uuid,
        title: String,
        description: Option<String>,
        priority: TaskPriority,
        assigned_to: Option<Uuid>,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Task, sqlx::Error>;

    async fn get_tasks(&self, workspace_id: Uuid) -> Result<Vec<Task>, sqlx::Error>;

    async fn get_task(&self, task_id: Uuid) -> Result<Option<Task>, sqlx::Error>;

    async fn update_task_status(
        &self,
        task_id: Uuid,
        status: TaskStatus,
    ) -> Result<Task, sqlx::Error>;

    // files
    async fn create_file(
        &self,
        workspace_id: Uuid,
        uploaded_by: Uuid,
        name: String,
        kind: FileKind,
        url: String,
    ) -> Result<WorkspaceFile, sqlx::Error>;

    async fn get_files(
        &self,
        workspace_id: Uuid,
        limit: i64,
    ) -> Result<Vec<WorkspaceFile>, sqlx::Error>;

    // chat
    async fn create_workspace_message(
        &self,
        workspace_id: Uuid,
        sender_id: Uuid,
        body: String,
    ) -> Result<WorkspaceMessage, sqlx::Error>;

    async fn get_workspace_messages(
        &self,
        workspace_id: Uuid,
        limit: i64,
    ) -> Result<Vec<WorkspaceMessage>, sqlx::Error>;

    // milestones
    async fn create_milestone(
        &self,
        workspace_id: Uuid,
        title: String,
        description: Option<String>,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Milestone, sqlx::Error>;

    async fn get_milestones(&self, workspace_id: Uuid) -> Result<Vec<Milestone>, sqlx::Error>;

    async fn get_milestone(&self, milestone_id: Uuid) -> Result<Option<Milestone>, sqlx::Error>;

    async fn complete_milestone(&self, milestone_id: Uuid) -> Result<Milestone, sqlx::Error>;
}

#[async_trait]
impl WorkspaceExt for DBClient {
    async fn get_or_create_workspace(&self, project_id: Uuid) -> Result<Workspace, sqlx::Error> {
        sqlx::query_as::<_, Workspace>(
            r#"
            INSERT INTO workspaces (project_id)
            VALUES ($1)
            ON CONFLICT (project_id) DO UPDATE
            SET updated_at = workspaces.updated_at
            RETURNING id, project_id, created_at, updated_at
            "#,
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_workspace(&self, project_id: Uuid) -> Result<Option<Workspace>, sqlx::Error> {
        sqlx::query_as::<_, Workspace>(
            r#"
            SELECT id, project_id, created_at, updated_at
            FROM workspaces
            WHERE project_id = $1
            "#,
        )
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_note(
        &self,
        workspace_id: Uuid,
        author_id: Uuid,
        title: String,
        content: String,
    ) -> Result<WorkspaceNote, sqlx::Error> {
        sqlx::query_as::<_, WorkspaceNote>(
            r#"
            INSERT INTO workspace_notes (workspace_id, author_id, title, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, workspace_id, title, content, author_id, created_at, updated_at
            "#,
        )
        .bind(workspace_id)
        .bind(author_id)
        .bind(title)
        .bind(content)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_notes(
        &self,
        workspace_id: Uuid,
        limit: i64,
    ) -> Result<Vec<WorkspaceNote>, sqlx::Error> {
        sqlx::query_as::<_, WorkspaceNote>(
            r#"
            SELECT id, workspace_id, title, content, author_id, created_at, updated_at
            FROM workspace_notes
            WHERE workspace_id = $1
            ORDER BY updated_at DESC
            LIMIT $2
            "#,
        )
        .bind(workspace_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn create_task(
        &self,
        workspace_id: Uuid,
        created_by: Uuid,
        title: String,
        description: Option<String>,
        priority: TaskPriority,
        assigned_to: Option<Uuid>,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Task, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks
                (workspace_id, created_by, title, description, priority, assigned_to, due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, workspace_id, title, description, status, priority,
                      assigned_to, created_by, due_date, created_at, updated_at
            "#,
        )
        .bind(workspace_id)
        .bind(created_by)
        .bind(title)
        .bind(description)
        .bind(priority)
        .bind(assigned_to)
        .bind(due_date)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_tasks(&self, workspace_id: Uuid) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, workspace_id, title, description, status, priority,
                   assigned_to, created_by, due_date, created_at, updated_at
            FROM tasks
            WHERE workspace_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(workspace_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_task(&self, task_id: Uuid) -> Result<Option<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, workspace_id, title, description, status, priority,
                   assigned_to, created_by, due_date, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(task_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_task_status(
        &self,
        task_id: Uuid,
        status: TaskStatus,
    ) -> Result<Task, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, workspace_id, title, description, status, priority,
                      assigned_to, created_by, due_date, created_at, updated_at
            "#,
        )
        .bind(task_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn create_file(
        &self,
        workspace_id: Uuid,
        uploaded_by: Uuid,
        name: String,
        kind: FileKind,
        url: String,
    ) -> Result<WorkspaceFile, sqlx::Error> {
        sqlx::query_as::<_, WorkspaceFile>(
            r#"
            INSERT INTO workspace_files (workspace_id, uploaded_by, name, kind, url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, workspace_id, name, kind, url, uploaded_by, uploaded_at
            "#,
        )
        .bind(workspace_id)
        .bind(uploaded_by)
        .bind(name)
        .bind(kind)
        .bind(url)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_files(
        &self,
        workspace_id: Uuid,
        limit: i64,
    ) -> Result<Vec<WorkspaceFile>, sqlx::Error> {
        sqlx::query_as::<_, WorkspaceFile>(
            r#"
            SELECT id, workspace_id, name, kind, url, uploaded_by, uploaded_at
            FROM workspace_files
            WHERE workspace_id = $1
            ORDER BY uploaded_at DESC
            LIMIT $2
            "#,
        )
        .bind(workspace_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn create_workspace_message(
        &self,
        workspace_id: Uuid,
        sender_id: Uuid,
        body: String,
    ) -> Result<WorkspaceMessage, sqlx::Error> {
        sqlx::query_as::<_, WorkspaceMessage>(
            r#"
            INSERT INTO workspace_messages (workspace_id, sender_id, body)
            VALUES ($1, $2, $3)
            RETURNING id, workspace_id, sender_id, body, created_at
            "#,
        )
        .bind(workspace_id)
        .bind(sender_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_workspace_messages(
        &self,
        workspace_id: Uuid,
        limit: i64,
    ) -> Result<Vec<WorkspaceMessage>, sqlx::Error> {
        sqlx::query_as::<_, WorkspaceMessage>(
            r#"
            SELECT id, workspace_id, sender_id, body, created_at
            FROM workspace_messages
            WHERE workspace_id = $1
            ORDER BY created_at ASC
            LIMIT $2
            "#,
        )
        .bind(workspace_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn create_milestone(
        &self,
        workspace_id: Uuid,
        title: String,
        description: Option<String>,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Milestone, sqlx::Error> {
        sqlx::query_as::<_, Milestone>(
            r#"
            INSERT INTO milestones (workspace_id, title, description, due_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, workspace_id, title, description, due_date, completed,
                      completed_at, created_at
            "#,
        )
        .bind(workspace_id)
        .bind(title)
        .bind(description)
        .bind(due_date)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_milestones(&self, workspace_id: Uuid) -> Result<Vec<Milestone>, sqlx::Error> {
        sqlx::query_as::<_, Milestone>(
            r#"
            SELECT id, workspace_id, title, description, due_date, completed,
                   completed_at, created_at
            FROM milestones
            WHERE workspace_id = $1
            ORDER BY due_date ASC NULLS LAST, created_at ASC
            "#,
        )
        .bind(workspace_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_milestone(&self, milestone_id: Uuid) -> Result<Option<Milestone>, sqlx::Error> {
        sqlx::query_as::<_, Milestone>(
            r#"
            SELECT id, workspace_id, title, description, due_date, completed,
                   completed_at, created_at
            FROM milestones
            WHERE id = $1
            "#,
        )
        .bind(milestone_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn complete_milestone(&self, milestone_id: Uuid) -> Result<Milestone, sqlx::Error> {
        sqlx::query_as::<_, Milestone>(
            r#"
            UPDATE milestones
            SET completed = true, completed_at = NOW()
            WHERE id = $1
            RETURNING id, workspace_id, title, description, due_date, completed,
                      completed_at, created_at
            "#,
        )
        .bind(milestone_id)
        .fetch_one(&self.pool)
        .await
    }
}
