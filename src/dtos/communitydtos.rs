// dtos/communitydtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{communitymodel::CommunityKind, projectmodel::Domain};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CommunityCreateDto {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1-200 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub kind: Option<CommunityKind>,
    pub domain: Option<Domain>,

    #[validate(length(max = 100))]
    pub location: Option<String>,

    #[validate(length(max = 200))]
    pub college: Option<String>,

    #[validate(url(message = "Cover image must be a valid URL"))]
    pub cover_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityListQuery {
    pub kind: Option<CommunityKind>,
    pub domain: Option<Domain>,
}
