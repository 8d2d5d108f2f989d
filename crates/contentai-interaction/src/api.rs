//! Typed wrappers around the backend endpoints.
//!
//! Each method builds the matching [`ApiRequest`] and checks the response
//! shape explicitly, failing with `InvalidResponse` instead of handing an
//! ambiguous payload to the caller.

use std::sync::Arc;

use contentai_core::auth::AuthSession;
use contentai_core::generation::{GenerationKind, GenerationRequest};
use contentai_core::post::{HistoryPage, NewPost, PopularPrompt};
use contentai_core::{ContentError, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::transport::{ApiRequest, AuthMode, MultipartForm, Transport};

pub const GENERATE_PATH: &str = "/api/generate";
pub const GENERATE_IMAGE_PATH: &str = "/api/generate/image";
pub const HISTORY_PATH: &str = "/api/history";
pub const POSTS_PATH: &str = "/api/posts";
pub const POPULAR_PROMPTS_PATH: &str = "/api/popular-prompts";
pub const GOOGLE_AUTH_PATH: &str = "/api/auth/google";

/// Outcome of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextGeneration {
    Post(String),
    /// The backend reported a generation failure in-band.
    Error(String),
}

/// Outcome of `POST /api/generate/image`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageGeneration {
    Url(String),
    Error(String),
}

#[derive(Deserialize)]
struct TextGenerationBody {
    #[serde(default)]
    post: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct ImageGenerationBody {
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for every endpoint the application consumes.
#[derive(Clone)]
pub struct ContentApi {
    transport: Arc<dyn Transport>,
}

impl ContentApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn generate_text(&self, request: &GenerationRequest) -> Result<TextGeneration> {
        let mut form = generation_form(request, request.kind);
        for (index, document) in request.documents.iter().enumerate() {
            form = form.file(
                format!("document_{}", index),
                document.file_name.clone(),
                document.mime_type.clone(),
                document.bytes.clone(),
            );
        }

        let value = self
            .transport
            .send(
                ApiRequest::post(GENERATE_PATH)
                    .auth(AuthMode::Optional)
                    .multipart(form),
            )
            .await?;

        parse_text_generation(value)
    }

    pub async fn generate_image(&self, request: &GenerationRequest) -> Result<ImageGeneration> {
        let form = generation_form(request, GenerationKind::Image);

        let value = self
            .transport
            .send(
                ApiRequest::post(GENERATE_IMAGE_PATH)
                    .auth(AuthMode::Optional)
                    .multipart(form),
            )
            .await?;

        parse_image_generation(value)
    }

    /// Fetches saved posts, `limit` at a time starting after `skip`.
    pub async fn history(&self, limit: u32, skip: u64, search: Option<&str>) -> Result<HistoryPage> {
        let search = search.map(str::trim).filter(|term| !term.is_empty());
        let value = self
            .transport
            .send(
                ApiRequest::get(HISTORY_PATH)
                    .query("limit", limit)
                    .query("skip", skip)
                    .query_opt("search", search),
            )
            .await?;

        decode(value, "history page")
    }

    pub async fn save_post(&self, post: &NewPost) -> Result<()> {
        let body = serde_json::to_value(post)?;
        self.transport
            .send(ApiRequest::post(POSTS_PATH).json(body))
            .await?;
        Ok(())
    }

    pub async fn delete_post(&self, id: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(ContentError::validation("Post id must not be empty"));
        }
        self.transport
            .send(ApiRequest::delete(format!("{}/{}", POSTS_PATH, id)))
            .await?;
        Ok(())
    }

    pub async fn popular_prompts(&self, limit: u32) -> Result<Vec<PopularPrompt>> {
        let value = self
            .transport
            .send(
                ApiRequest::get(POPULAR_PROMPTS_PATH)
                    .auth(AuthMode::None)
                    .query("limit", limit),
            )
            .await?;

        decode(value, "popular prompts")
    }

    /// Exchanges a Google identity credential for a `{user, token}` pair.
    pub async fn login_google(&self, credential: &str) -> Result<AuthSession> {
        let value = self
            .transport
            .send(
                ApiRequest::post(GOOGLE_AUTH_PATH)
                    .auth(AuthMode::None)
                    .json(json!({ "token": credential })),
            )
            .await?;

        decode(value, "login")
    }
}

fn generation_form(request: &GenerationRequest, kind: GenerationKind) -> MultipartForm {
    MultipartForm::new()
        .text("template", request.template.to_string())
        .text("objective", request.objective.clone())
        .text("context", request.context.clone())
        .text("type", kind.to_string())
}

fn parse_text_generation(value: Value) -> Result<TextGeneration> {
    let body: TextGenerationBody = serde_json::from_value(value)
        .map_err(|_| ContentError::invalid_response("Invalid text generation response"))?;

    match (body.post, body.error) {
        (Some(post), _) if !post.trim().is_empty() => Ok(TextGeneration::Post(post)),
        (_, Some(error)) if !error.trim().is_empty() => Ok(TextGeneration::Error(error)),
        _ => Err(ContentError::invalid_response("Invalid text generation response")),
    }
}

fn parse_image_generation(value: Value) -> Result<ImageGeneration> {
    let body: ImageGenerationBody = serde_json::from_value(value.clone()).map_err(|_| {
        ContentError::invalid_response(format!("Invalid image generation response: {}", value))
    })?;

    match (body.image_url, body.error) {
        (Some(url), _) if !url.trim().is_empty() => Ok(ImageGeneration::Url(url)),
        (_, Some(error)) if !error.trim().is_empty() => Ok(ImageGeneration::Error(error)),
        _ => Err(ContentError::invalid_response(format!(
            "Invalid image generation response: {}",
            value
        ))),
    }
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| ContentError::invalid_response(format!("Unexpected {} payload: {}", what, e)))
}
