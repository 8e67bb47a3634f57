//! Durable client state: session persistence and configuration loading.

pub mod config_service;
pub mod json_session_repository;
pub mod paths;

pub use config_service::ConfigService;
pub use json_session_repository::JsonSessionRepository;
pub use paths::SkilletPaths;
