pub mod cache;
pub mod chatdb;
pub mod communitydb;
pub mod db;
pub mod projectdb;
pub mod userdb;
pub mod workspacedb;
