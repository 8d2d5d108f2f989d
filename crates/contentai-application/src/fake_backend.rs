//! In-memory stand-ins for the backend and local services, shared by the
//! use case tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use contentai_core::auth::{AuthSession, SessionContext, SessionRepository, SessionStore, User};
use contentai_core::clipboard::Clipboard;
use contentai_core::{ContentError, Result};
use contentai_interaction::api::{
    GENERATE_IMAGE_PATH, GENERATE_PATH, GOOGLE_AUTH_PATH, HISTORY_PATH, POPULAR_PROMPTS_PATH,
    POSTS_PATH,
};
use contentai_interaction::{ApiRequest, AuthMode, ContentApi, ImageProbe, RequestBody, Transport};
use serde_json::{Value, json};

pub fn sample_session(token: &str) -> AuthSession {
    AuthSession {
        user: User {
            id: "u-1".to_string(),
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            picture: None,
        },
        token: token.to_string(),
    }
}

pub fn signed_in_store() -> SessionStore {
    let store = SessionStore::new();
    store.replace(Some(sample_session("tok")));
    store
}

struct FakeState {
    text_response: Result<Value>,
    image_response: Result<Value>,
    login_response: Result<Value>,
    popular: Value,
    posts: Vec<Value>,
    next_id: u32,
    total_pages_override: Option<u32>,
    calls: Vec<ApiRequest>,
}

/// Backend double that behaves like the real service for the endpoints the
/// application uses. Protected calls without a session are refused before
/// they are recorded, like `HttpTransport` does.
pub struct FakeBackend {
    session: SessionContext,
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn new(session: SessionContext) -> Arc<Self> {
        Arc::new(Self {
            session,
            state: Mutex::new(FakeState {
                text_response: Ok(json!({ "post": "Exciting launch..." })),
                image_response: Ok(json!({ "image_url": "http://img/ok.png" })),
                login_response: Ok(json!({
                    "user": { "id": "u-1", "email": "ada@example.com", "name": "Ada" },
                    "token": "tok"
                })),
                popular: json!([]),
                posts: Vec::new(),
                next_id: 1,
                total_pages_override: None,
                calls: Vec::new(),
            }),
        })
    }

    pub fn api(self: &Arc<Self>) -> ContentApi {
        ContentApi::new(self.clone())
    }

    pub fn set_text_response(&self, response: Result<Value>) {
        self.state.lock().unwrap().text_response = response;
    }

    pub fn set_image_response(&self, response: Result<Value>) {
        self.state.lock().unwrap().image_response = response;
    }

    pub fn set_login_response(&self, response: Result<Value>) {
        self.state.lock().unwrap().login_response = response;
    }

    pub fn set_popular(&self, popular: Value) {
        self.state.lock().unwrap().popular = popular;
    }

    pub fn override_total_pages(&self, total_pages: u32) {
        self.state.lock().unwrap().total_pages_override = Some(total_pages);
    }

    /// Stores `count` posts whose content is `"Post {n}"`.
    pub fn seed_posts(&self, count: u32) {
        let mut state = self.state.lock().unwrap();
        for n in 1..=count {
            let id = state.next_id;
            state.next_id += 1;
            state.posts.push(stored_post(
                id,
                &json!({
                    "template": "tech-insight",
                    "objective": format!("Objective {}", n),
                    "context": "B2B SaaS",
                    "type": "text",
                    "generated_content": format!("Post {}", n),
                }),
            ));
        }
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn calls_to(&self, endpoint: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.endpoint == endpoint)
            .count()
    }

    pub fn post_count(&self) -> usize {
        self.state.lock().unwrap().posts.len()
    }
}

fn stored_post(id: u32, body: &Value) -> Value {
    json!({
        "_id": format!("post-{}", id),
        "template": body["template"],
        "objective": body["objective"],
        "context": body["context"],
        "type": body["type"],
        "generated_content": body["generated_content"],
        "created_at": chrono::Utc::now().to_rfc3339(),
    })
}

fn query_value<'a>(request: &'a ApiRequest, key: &str) -> Option<&'a str> {
    request
        .query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

impl FakeState {
    fn history_page(&self, request: &ApiRequest) -> Value {
        let limit: usize = query_value(request, "limit")
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);
        let skip: usize = query_value(request, "skip")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let search = query_value(request, "search").map(str::to_lowercase);

        let matching: Vec<&Value> = self
            .posts
            .iter()
            .rev()
            .filter(|post| match &search {
                Some(term) => ["objective", "context", "generated_content"]
                    .iter()
                    .any(|field| {
                        post[*field]
                            .as_str()
                            .unwrap_or_default()
                            .to_lowercase()
                            .contains(term)
                    }),
                None => true,
            })
            .collect();

        let total = matching.len();
        let total_pages = self
            .total_pages_override
            .unwrap_or_else(|| total.div_ceil(limit).max(1) as u32);
        let posts: Vec<Value> = matching
            .into_iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect();

        json!({
            "posts": posts,
            "total": total,
            "page": skip / limit + 1,
            "totalPages": total_pages,
        })
    }
}

#[async_trait]
impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        if request.auth == AuthMode::Required && !self.session.is_signed_in() {
            return Err(ContentError::AuthenticationRequired);
        }

        let mut state = self.state.lock().unwrap();
        state.calls.push(request.clone());

        match (request.method.as_str(), request.endpoint.as_str()) {
            ("POST", GENERATE_PATH) => state.text_response.clone(),
            ("POST", GENERATE_IMAGE_PATH) => state.image_response.clone(),
            ("GET", HISTORY_PATH) => Ok(state.history_page(&request)),
            ("POST", POSTS_PATH) => {
                let Some(RequestBody::Json(body)) = &request.body else {
                    return Err(ContentError::http(422, "Unprocessable Entity"));
                };
                let id = state.next_id;
                state.next_id += 1;
                state.posts.push(stored_post(id, body));
                Ok(Value::Null)
            }
            ("DELETE", path) if path.starts_with("/api/posts/") => {
                let id = path.trim_start_matches("/api/posts/").to_string();
                let before = state.posts.len();
                state.posts.retain(|post| post["_id"] != id.as_str());
                if state.posts.len() == before {
                    return Err(ContentError::http(404, "Post not found"));
                }
                Ok(Value::Null)
            }
            ("GET", POPULAR_PROMPTS_PATH) => Ok(state.popular.clone()),
            ("POST", GOOGLE_AUTH_PATH) => state.login_response.clone(),
            _ => Err(ContentError::http(404, "404 Not Found")),
        }
    }
}

/// Image probe that fails for a fixed set of URLs.
#[derive(Default)]
pub struct FakeImageProbe {
    broken: HashSet<String>,
}

impl FakeImageProbe {
    pub fn broken(urls: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            broken: urls.iter().map(|url| url.to_string()).collect(),
        })
    }
}

#[async_trait]
impl ImageProbe for FakeImageProbe {
    async fn verify(&self, url: &str) -> Result<()> {
        if self.broken.contains(url) {
            return Err(ContentError::client("Failed to load image"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingClipboard {
    pub fail: bool,
    pub copied: Mutex<Vec<String>>,
}

impl Clipboard for RecordingClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        if self.fail {
            return Err(ContentError::client("Clipboard access denied"));
        }
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySessionRepository {
    pub stored: Mutex<Option<AuthSession>>,
    pub fail_load: bool,
    pub clear_calls: Mutex<u32>,
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn load(&self) -> Result<Option<AuthSession>> {
        if self.fail_load {
            return Err(ContentError::Serialization {
                format: "TOML".to_string(),
                message: "corrupt".to_string(),
            });
        }
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn save(&self, session: &AuthSession) -> Result<()> {
        *self.stored.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.clear_calls.lock().unwrap() += 1;
        *self.stored.lock().unwrap() = None;
        Ok(())
    }
}
