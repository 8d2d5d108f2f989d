//! Unified path management for ContentAI files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/contentai/          # Config directory
//! ├── config.toml               # Client configuration (optional)
//! └── session.toml              # Signed-in session (token + user)
//! ```

use std::path::PathBuf;

use contentai_core::{ContentError, Result};

const APP_DIR: &str = "contentai";

pub struct ContentPaths;

impl ContentPaths {
    /// Returns the ContentAI configuration directory.
    ///
    /// Uses the platform config directory (XDG on Linux).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ContentError::config("Cannot find config directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path of the persisted session.
    ///
    /// # Security Note
    ///
    /// The file holds a bearer token and is written with mode 600 on Unix.
    pub fn session_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("session.toml"))
    }
}
