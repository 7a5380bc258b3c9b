pub mod ai;
pub mod auth;
pub mod chat;
pub mod communities;
pub mod feed;
pub mod projects;
pub mod users;
pub mod workspace;
