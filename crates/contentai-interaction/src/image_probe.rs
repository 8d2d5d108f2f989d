//! Loadability check for generated image URLs.
//!
//! A backend can answer an image request with a URL that does not serve an
//! image. The probe fetches the URL and only accepts a successful response
//! whose content type is an image.

use async_trait::async_trait;
use contentai_core::{ContentError, Result};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

pub const IMAGE_LOAD_FAILED: &str = "Failed to load image";

#[async_trait]
pub trait ImageProbe: Send + Sync {
    /// Succeeds when `url` serves an image; otherwise `Client("Failed to load image")`.
    async fn verify(&self, url: &str) -> Result<()>;
}

#[derive(Clone, Default)]
pub struct HttpImageProbe {
    client: Client,
}

impl HttpImageProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageProbe for HttpImageProbe {
    async fn verify(&self, url: &str) -> Result<()> {
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::warn!("Image probe could not reach {}: {}", url, e);
            ContentError::client(IMAGE_LOAD_FAILED)
        })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        if !is_loadable(status.is_success(), content_type.as_deref()) {
            tracing::warn!(
                "Image probe rejected {} (status {}, content type {:?})",
                url,
                status,
                content_type
            );
            return Err(ContentError::client(IMAGE_LOAD_FAILED));
        }

        Ok(())
    }
}

/// Servers that omit the content type get the benefit of the doubt.
fn is_loadable(success: bool, content_type: Option<&str>) -> bool {
    success
        && content_type
            .map(|value| value.trim().to_ascii_lowercase().starts_with("image/"))
            .unwrap_or(true)
}
