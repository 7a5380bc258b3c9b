// dtos/workspacedtos.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::workspacemodel::{FileKind, TaskPriority, TaskStatus};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct NoteCreateDto {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreateDto {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1-200 characters"))]
    pub title: String,

    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatusUpdateDto {
    pub status: TaskStatus,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct FileCreateDto {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1-200 characters"))]
    pub name: String,

    pub kind: Option<FileKind>,

    #[validate(url(message = "File URL must be valid"))]
    pub url: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceMessageDto {
    #[validate(length(min = 1, max = 5000, message = "Message must be between 1-5000 characters"))]
    pub body: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneCreateDto {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1-200 characters"))]
    pub title: String,

    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}
