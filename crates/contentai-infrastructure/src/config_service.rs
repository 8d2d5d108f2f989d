//! Configuration service implementation.
//!
//! Loads `ClientConfig` from `~/.config/contentai/config.toml` when present
//! and applies the `CONTENTAI_API_URL` environment override on top.

use std::path::PathBuf;

use contentai_core::Result;
use contentai_core::config::ClientConfig;

use crate::paths::ContentPaths;
use crate::storage::AtomicTomlFile;

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "CONTENTAI_API_URL";

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
}

impl ConfigService {
    /// Reads from the default config file location.
    pub fn new() -> Self {
        Self {
            path: ContentPaths::config_file().ok(),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// Loads the configuration: file (if any), then environment.
    ///
    /// A missing file yields defaults; a malformed file is an error.
    pub fn load(&self) -> Result<ClientConfig> {
        let from_file = match &self.path {
            Some(path) => AtomicTomlFile::<ClientConfig>::new(path.clone()).load()?,
            None => None,
        };

        let config = from_file.unwrap_or_default();
        Ok(apply_env_override(config, std::env::var(API_URL_ENV).ok()))
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_env_override(config: ClientConfig, api_url: Option<String>) -> ClientConfig {
    match api_url.filter(|url| !url.trim().is_empty()) {
        Some(url) => {
            tracing::debug!("Using backend URL from {}", API_URL_ENV);
            config.with_base_url(url)
        }
        None => config,
    }
}
