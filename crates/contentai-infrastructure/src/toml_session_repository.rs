//! TOML-based SessionRepository implementation.
//!
//! Plays the role of browser local storage: the bearer token and the user
//! identity are kept under two fixed keys in `session.toml`.

use std::path::PathBuf;

use async_trait::async_trait;
use contentai_core::auth::{AuthSession, SessionRepository, User};
use contentai_core::{ContentError, Result};
use serde::{Deserialize, Serialize};

use crate::paths::ContentPaths;
use crate::storage::AtomicTomlFile;

/// On-disk layout of `session.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<User>,
}

pub struct TomlSessionRepository {
    path: PathBuf,
}

impl TomlSessionRepository {
    /// Uses `~/.config/contentai/session.toml`.
    pub fn new_default() -> Result<Self> {
        Ok(Self::with_path(ContentPaths::session_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn file(&self) -> AtomicTomlFile<StoredSession> {
        AtomicTomlFile::new(self.path.clone()).private()
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(AtomicTomlFile<StoredSession>) -> Result<T> + Send + 'static,
    {
        let file = self.file();
        tokio::task::spawn_blocking(move || f(file))
            .await
            .map_err(|e| ContentError::storage(format!("Session storage task failed: {}", e)))?
    }
}

#[async_trait]
impl SessionRepository for TomlSessionRepository {
    async fn load(&self) -> Result<Option<AuthSession>> {
        let stored = self.blocking(|file| file.load()).await?;

        Ok(stored.and_then(|stored| match (stored.auth_token, stored.user) {
            (Some(token), Some(user)) => Some(AuthSession { user, token }),
            _ => {
                tracing::debug!("Ignoring incomplete stored session");
                None
            }
        }))
    }

    async fn save(&self, session: &AuthSession) -> Result<()> {
        let stored = StoredSession {
            auth_token: Some(session.token.clone()),
            user: Some(session.user.clone()),
        };
        self.blocking(move |file| file.save(&stored)).await?;
        tracing::debug!("Stored session for {}", session.user.email);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.blocking(|file| file.remove()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_session() -> AuthSession {
        AuthSession {
            user: User {
                id: "u-42".to_string(),
                email: "ada@example.com".to_string(),
                name: "Ada".to_string(),
                picture: Some("https://img.example.com/ada.png".to_string()),
            },
            token: "jwt-token".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_and_load_session() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlSessionRepository::with_path(temp_dir.path().join("session.toml"));

        repo.save(&sample_session()).await.unwrap();
        let loaded = repo.load().await.unwrap();

        assert_eq!(loaded, Some(sample_session()));
    }

    #[tokio::test]
    async fn test_file_uses_fixed_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.toml");
        let repo = TomlSessionRepository::with_path(path.clone());

        repo.save(&sample_session()).await.unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();

        assert!(raw.contains("auth_token = \"jwt-token\""));
        assert!(raw.contains("[user]"));
    }

    #[tokio::test]
    async fn test_partial_session_loads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.toml");
        std::fs::write(&path, "auth_token = \"orphan\"\n").unwrap();

        let repo = TomlSessionRepository::with_path(path);
        assert_eq!(repo.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlSessionRepository::with_path(temp_dir.path().join("session.toml"));

        repo.clear().await.unwrap();
        repo.save(&sample_session()).await.unwrap();
        repo.clear().await.unwrap();
        repo.clear().await.unwrap();

        assert_eq!(repo.load().await.unwrap(), None);
    }
}
