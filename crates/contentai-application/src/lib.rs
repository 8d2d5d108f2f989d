//! Application layer for the ContentAI client.
//!
//! Use cases that sit between the presentation shell and the backend API:
//! generating content, browsing saved posts, and signing in and out.

pub mod auth_service;
pub mod generation_workflow;
pub mod history_browser;

#[cfg(test)]
mod fake_backend;

pub use auth_service::AuthService;
pub use generation_workflow::{GenerationWorkflow, SaveOutcome};
pub use history_browser::HistoryBrowser;
