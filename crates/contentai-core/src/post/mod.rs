//! Saved post domain module.
//!
//! Posts are created by the backend when a result is saved, listed page by
//! page, and deleted on request. They are never edited in place.

mod model;
mod timestamp;

pub use model::{HistoryPage, NewPost, PopularPrompt, StoredPost};
