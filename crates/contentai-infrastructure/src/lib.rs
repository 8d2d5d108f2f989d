//! Local infrastructure for the ContentAI client: file locations, atomic
//! TOML storage, session persistence, configuration loading, document
//! loading and the system clipboard.

pub mod clipboard;
pub mod config_service;
pub mod document_loader;
pub mod paths;
pub mod storage;
pub mod toml_session_repository;

pub use crate::clipboard::SystemClipboard;
pub use crate::config_service::ConfigService;
pub use crate::toml_session_repository::TomlSessionRepository;
