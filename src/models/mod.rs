pub mod badgemodel;
pub mod chatmodel;
pub mod communitymodel;
pub mod projectmodel;
pub mod usermodel;
pub mod workspacemodel;
