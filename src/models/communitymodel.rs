// models/communitymodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::projectmodel::Domain;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "community_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CommunityKind {
    College,
    TechClub,
    ResearchGroup,
    Hackathon,
    General,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Community {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub kind: CommunityKind,
    pub domain: Option<Domain>,
    pub location: Option<String>,
    pub college: Option<String>,
    pub cover_image_url: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}
