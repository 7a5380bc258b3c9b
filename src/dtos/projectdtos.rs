// dtos/projectdtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::projectmodel::{Domain, MemberRole, ProjectStage, Visibility};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectDto {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub problem_statement: Option<String>,

    pub domain: Option<Domain>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub skills_required: Vec<String>,

    pub stage: Option<ProjectStage>,
    pub visibility: Option<Visibility>,

    #[validate(length(max = 100))]
    pub location: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub state: Option<String>,
    #[validate(length(max = 100))]
    pub country: Option<String>,

    #[validate(url(message = "Cover image must be a valid URL"))]
    pub cover_image_url: Option<String>,

    #[validate(url(message = "Demo video must be a valid URL"))]
    pub demo_video_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageUpdateDto {
    pub stage: ProjectStage,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreateDto {
    #[validate(length(min = 1, max = 2000, message = "Comment must be between 1-2000 characters"))]
    pub content: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CollaborationRequestDto {
    pub role: Option<MemberRole>,

    #[serde(default)]
    pub skills: Vec<String>,

    pub experience: Option<String>,

    #[validate(length(min = 1, max = 2000, message = "Message is required"))]
    pub message: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct RespondCollabDto {
    /// "accept" or "decline"
    #[validate(length(min = 1, message = "Action is required"))]
    pub action: String,
}
