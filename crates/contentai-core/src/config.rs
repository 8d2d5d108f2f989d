//! Client configuration shared by every crate.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_HISTORY_PAGE_SIZE: u32 = 6;
pub const DEFAULT_POPULAR_PROMPT_LIMIT: u32 = 5;

/// Settings for talking to the ContentAI backend.
///
/// Every field is optional in `config.toml`; missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend root, without the `/api` prefix.
    pub base_url: String,
    pub history_page_size: u32,
    pub popular_prompt_limit: u32,
    /// Probe generated image URLs before reporting them as ready.
    pub verify_images: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            history_page_size: DEFAULT_HISTORY_PAGE_SIZE,
            popular_prompt_limit: DEFAULT_POPULAR_PROMPT_LIMIT,
            verify_images: true,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str("base_url = \"https://api.example.com\"").unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.history_page_size, DEFAULT_HISTORY_PAGE_SIZE);
        assert!(config.verify_images);
    }
}
