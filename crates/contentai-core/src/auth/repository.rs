//! Session repository trait.
//!
//! Defines how the signed-in session survives a restart.

use async_trait::async_trait;

use super::model::AuthSession;
use crate::error::Result;

/// Persistent storage for the current session.
///
/// # Implementation Notes
///
/// Implementations store the token and the user under fixed keys and must
/// treat `clear` on an empty store as success.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads the stored session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(AuthSession))`: A complete session was stored
    /// - `Ok(None)`: Nothing stored (or only part of it)
    /// - `Err(_)`: Storage could not be read
    async fn load(&self) -> Result<Option<AuthSession>>;

    /// Stores the session, replacing whatever was there.
    async fn save(&self, session: &AuthSession) -> Result<()>;

    /// Removes any stored session.
    async fn clear(&self) -> Result<()>;
}
