//! Authentication domain module.
//!
//! # Module Structure
//!
//! - `model`: user identity and the `{user, token}` session pair
//! - `context`: the shared session handle (read view + write handle)
//! - `repository`: persistence of the session across restarts

mod context;
mod model;
mod repository;

pub use context::{SessionContext, SessionStore};
pub use model::{AuthSession, User};
pub use repository::SessionRepository;
