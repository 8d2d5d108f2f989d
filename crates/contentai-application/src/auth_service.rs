//! Sign-in, sign-out and session restore.
//!
//! `AuthService` is the only owner of the [`SessionStore`]. Everything else
//! gets a [`SessionContext`] through [`AuthService::context`].

use std::sync::Arc;

use contentai_core::Result;
use contentai_core::auth::{SessionContext, SessionRepository, SessionStore, User};
use contentai_interaction::ContentApi;

pub struct AuthService {
    api: ContentApi,
    repository: Arc<dyn SessionRepository>,
    store: SessionStore,
}

impl AuthService {
    pub fn new(api: ContentApi, repository: Arc<dyn SessionRepository>, store: SessionStore) -> Self {
        Self {
            api,
            repository,
            store,
        }
    }

    pub fn context(&self) -> SessionContext {
        self.store.context()
    }

    /// Loads a persisted session. A missing or unreadable file leaves the
    /// client signed out.
    pub async fn restore(&self) -> Option<User> {
        match self.repository.load().await {
            Ok(Some(session)) => {
                let user = session.user.clone();
                tracing::info!(user = %user.email, "Restored session");
                self.store.replace(Some(session));
                Some(user)
            }
            Ok(None) => {
                self.store.clear();
                None
            }
            Err(e) => {
                tracing::warn!("Ignoring stored session: {}", e);
                self.store.clear();
                None
            }
        }
    }

    /// Exchanges a Google credential for a session, persists it, then makes
    /// it current.
    pub async fn login(&self, credential: &str) -> Result<User> {
        let session = self.api.login_google(credential).await?;
        self.repository.save(&session).await?;

        let user = session.user.clone();
        self.store.replace(Some(session));
        tracing::info!(user = %user.email, "Signed in");
        Ok(user)
    }

    /// Drops the in-memory session and the stored one. Safe to call when
    /// already signed out.
    pub async fn logout(&self) -> Result<()> {
        self.store.clear();
        self.repository.clear().await?;
        tracing::info!("Signed out");
        Ok(())
    }
}
