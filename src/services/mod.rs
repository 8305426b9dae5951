pub mod event_service;
pub mod user_service;
