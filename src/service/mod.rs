pub mod error;
pub mod matching_service;
pub mod notification_service;
pub mod reputation_service;
pub mod starter_kit;
pub mod suggestion_service;
