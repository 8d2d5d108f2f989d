//! Domain layer for the ContentAI client.
//!
//! Holds the types every other crate speaks: templates, generation requests
//! and results, saved posts, the signed-in session, client configuration and
//! the shared error type.

pub mod auth;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod generation;
pub mod post;
pub mod template;

// Re-export common error type
pub use error::{ContentError, Remediation, Result};
