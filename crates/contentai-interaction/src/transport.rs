//! Transport client for the ContentAI backend.
//!
//! Every backend call is described by an [`ApiRequest`] and executed through
//! the [`Transport`] trait. [`HttpTransport`] is the reqwest implementation;
//! tests substitute their own.

use async_trait::async_trait;
use contentai_core::auth::SessionContext;
use contentai_core::{ContentError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, StatusCode, Url};
use serde_json::Value;

/// How a request relates to the signed-in session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Never send the token.
    None,
    /// Send the token when signed in.
    Optional,
    /// Refuse to send the request without a token.
    Required,
}

/// One field of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime_type: String,
        bytes: Vec<u8>,
    },
}

/// Multipart form kept in plain data so requests stay inspectable and cloneable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// Value of the first text field called `name`.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    fn into_reqwest(self) -> Result<Form> {
        let mut form = Form::new();
        for part in self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File {
                    name,
                    file_name,
                    mime_type,
                    bytes,
                } => {
                    let part = Part::bytes(bytes)
                        .file_name(file_name)
                        .mime_str(&mime_type)
                        .map_err(|e| {
                            ContentError::client(format!("Invalid MIME type '{}': {}", mime_type, e))
                        })?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Multipart(MultipartForm),
}

/// A backend call: method, endpoint, query, body and auth requirement.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: String,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    pub auth: AuthMode,
}

impl ApiRequest {
    /// Requests default to `AuthMode::Required`.
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: None,
            auth: AuthMode::Required,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Adds a query parameter only when a value is present.
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn json(mut self, value: Value) -> Self {
        self.body = Some(RequestBody::Json(value));
        self
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    pub fn auth(mut self, auth: AuthMode) -> Self {
        self.auth = auth;
        self
    }
}

/// Executes backend calls.
///
/// On success returns the parsed JSON body (`Value::Null` for empty bodies);
/// callers validate its shape.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value>;
}

/// reqwest-backed transport reading the bearer token from the session.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    session: SessionContext,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, session: SessionContext) -> Self {
        Self::with_client(Client::new(), base_url, session)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>, session: SessionContext) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Picks the token to send, failing early for protected calls without one.
    fn token_for(&self, auth: AuthMode) -> Result<Option<String>> {
        match auth {
            AuthMode::None => Ok(None),
            AuthMode::Optional => Ok(self.session.token()),
            AuthMode::Required => self
                .session
                .token()
                .map(Some)
                .ok_or(ContentError::AuthenticationRequired),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let token = self.token_for(request.auth)?;
        let url = build_url(&self.base_url, &request.endpoint, &request.query)?;

        tracing::debug!(method = %request.method, endpoint = %request.endpoint, "Sending API request");

        let mut builder = self.client.request(request.method, url);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            // reqwest sets `Content-Type: application/json` for us.
            Some(RequestBody::Json(value)) => builder.json(&value),
            // Boundary and content type come from reqwest.
            Some(RequestBody::Multipart(form)) => builder.multipart(form.into_reqwest()?),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ContentError::network(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ContentError::network(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let error = error_from_response(status, &body);
            tracing::warn!(endpoint = %request.endpoint, "API request failed: {}", error);
            return Err(error);
        }

        parse_success_body(&body)
    }
}

/// Joins the base URL, endpoint and query parameters.
pub fn build_url(base_url: &str, endpoint: &str, query: &[(String, String)]) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    );
    let mut url = Url::parse(&joined)
        .map_err(|e| ContentError::config(format!("Invalid API URL '{}': {}", joined, e)))?;

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}

/// Builds an `Http` error, preferring the server's own message.
pub fn error_from_response(status: StatusCode, body: &[u8]) -> ContentError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| server_message(&value))
        .unwrap_or_else(|| status_line(status));
    ContentError::http(status.as_u16(), message)
}

fn server_message(value: &Value) -> Option<String> {
    ["detail", "error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

fn parse_success_body(body: &[u8]) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|e| ContentError::invalid_response(format!("Response is not valid JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contentai_core::auth::{AuthSession, SessionStore, User};
    use serde_json::json;

    #[test]
    fn test_build_url_joins_and_encodes() {
        let url = build_url(
            "http://localhost:8000/",
            "/api/history",
            &[
                ("limit".to_string(), "6".to_string()),
                ("search".to_string(), "AI & ML".to_string()),
            ],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/history?limit=6&search=AI+%26+ML"
        );
    }

    #[test]
    fn test_build_url_without_query_has_no_question_mark() {
        let url = build_url("http://localhost:8000", "api/posts", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/posts");
    }

    #[test]
    fn test_build_url_rejects_bad_base() {
        assert!(matches!(
            build_url("not a url", "/api/posts", &[]),
            Err(ContentError::Config(_))
        ));
    }

    #[test]
    fn test_error_prefers_server_detail() {
        let err = error_from_response(StatusCode::BAD_REQUEST, br#"{"detail":"Objective too long"}"#);
        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().contains("Objective too long"));

        let err = error_from_response(StatusCode::INTERNAL_SERVER_ERROR, br#"{"error":"model offline"}"#);
        assert!(err.to_string().contains("model offline"));
    }

    #[test]
    fn test_error_falls_back_to_status_line() {
        let err = error_from_response(StatusCode::NOT_FOUND, b"<html>nope</html>");
        assert_eq!(err.to_string(), "HTTP error 404: 404 Not Found");
    }

    #[test]
    fn test_empty_success_body_is_null() {
        assert_eq!(parse_success_body(b"").unwrap(), Value::Null);
        assert_eq!(parse_success_body(b" \n").unwrap(), Value::Null);
        assert_eq!(parse_success_body(br#"{"post":"hi"}"#).unwrap(), json!({"post": "hi"}));
        assert!(parse_success_body(b"oops").unwrap_err().is_invalid_response());
    }

    #[test]
    fn test_token_selection_by_auth_mode() {
        let store = SessionStore::new();
        let transport = HttpTransport::new("http://localhost:8000", store.context());

        assert!(matches!(
            transport.token_for(AuthMode::Required),
            Err(ContentError::AuthenticationRequired)
        ));
        assert_eq!(transport.token_for(AuthMode::Optional).unwrap(), None);

        store.replace(Some(AuthSession {
            user: User {
                id: "u1".into(),
                email: "ada@example.com".into(),
                name: "Ada".into(),
                picture: None,
            },
            token: "tok".into(),
        }));

        assert_eq!(transport.token_for(AuthMode::Required).unwrap().as_deref(), Some("tok"));
        assert_eq!(transport.token_for(AuthMode::Optional).unwrap().as_deref(), Some("tok"));
        assert_eq!(transport.token_for(AuthMode::None).unwrap(), None);
    }

    #[test]
    fn test_multipart_text_lookup() {
        let form = MultipartForm::new()
            .text("template", "tech-insight")
            .file("document_0", "a.txt", "text/plain", b"x".to_vec());
        assert_eq!(form.text_value("template"), Some("tech-insight"));
        assert_eq!(form.text_value("document_0"), None);
        assert_eq!(form.parts().len(), 2);
    }
}
