use std::sync::{Arc, RwLock};

use super::model::{AuthSession, User};

/// Read-only view of the current session.
///
/// Cloned into every component that needs the bearer token. Components
/// holding a `SessionContext` can observe sign-in and sign-out but cannot
/// change the session.
#[derive(Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Option<AuthSession>>>,
}

impl SessionContext {
    /// A context that is permanently signed out.
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<AuthSession> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|session| session.token)
    }

    pub fn user(&self) -> Option<User> {
        self.current().map(|session| session.user)
    }

    pub fn is_signed_in(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }
}

/// Write handle for the session; owned by the authentication service.
///
/// The session is only ever replaced as a whole.
#[derive(Default)]
pub struct SessionStore {
    context: SessionContext,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out a read view sharing this store's state.
    pub fn context(&self) -> SessionContext {
        self.context.clone()
    }

    pub fn replace(&self, session: Option<AuthSession>) {
        *self
            .context
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = session;
    }

    pub fn clear(&self) {
        self.replace(None);
    }
}
