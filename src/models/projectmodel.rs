// models/projectmodel.rs
use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "project_domain", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    AiMachineLearning,
    WebDevelopment,
    MobileDevelopment,
    DataScience,
    Cybersecurity,
    Robotics,
    Iot,
    Blockchain,
    ArVr,
    Biotech,
    Design,
    Research,
}

impl Domain {
    /// Display name, also the string the starter-kit generator keys on.
    pub fn to_str(&self) -> &str {
        match self {
            Domain::AiMachineLearning => "AI & Machine Learning",
            Domain::WebDevelopment => "Web Development",
            Domain::MobileDevelopment => "Mobile Development",
            Domain::DataScience => "Data Science",
            Domain::Cybersecurity => "Cybersecurity",
            Domain::Robotics => "Robotics",
            Domain::Iot => "IoT",
            Domain::Blockchain => "Blockchain",
            Domain::ArVr => "AR/VR",
            Domain::Biotech => "Biotech",
            Domain::Design => "Design",
            Domain::Research => "Research",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "project_stage", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStage {
    Idea,
    SeekingCollaborators,
    InProgress,
    Completed,
}

impl ProjectStage {
    pub fn to_str(&self) -> &str {
        match self {
            ProjectStage::Idea => "idea",
            ProjectStage::SeekingCollaborators => "seeking_collaborators",
            ProjectStage::InProgress => "in_progress",
            ProjectStage::Completed => "completed",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "project_visibility", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Private,
    Unlisted,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Project {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub problem_statement: Option<String>,

    pub domain: Option<Domain>,
    pub tags: Vec<String>,
    pub skills_required: Vec<String>,

    pub stage: ProjectStage,
    pub visibility: Visibility,

    pub location: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,

    pub cover_image_url: Option<String>,
    pub demo_video_url: Option<String>,

    pub views_count: i32,
    pub likes_count: i32,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "collab_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CollabStatus {
    Pending,
    Accepted,
    Declined,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "member_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Owner,
    Developer,
    Researcher,
    Designer,
    Mentor,
    Other,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct CollaborationRequest {
    pub id: Uuid,
    pub project_id: Uuid,
    pub requester_id: Uuid,
    pub role: MemberRole,
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub message: String,
    pub status: CollabStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ProjectMember {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Comment {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Like {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Follow {
    pub id: Uuid,
    pub follower_id: Uuid,
    pub following_id: Uuid,
    pub created_at: DateTime<Utc>,
}
