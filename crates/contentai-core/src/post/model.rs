use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::generation::GenerationKind;
use crate::template::TemplateId;

/// A generation that the backend persisted for the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPost {
    #[serde(rename = "_id")]
    pub id: String,
    pub template: TemplateId,
    pub objective: String,
    pub context: String,
    #[serde(rename = "type", default)]
    pub kind: GenerationKind,
    pub generated_content: String,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub template: TemplateId,
    pub objective: String,
    pub context: String,
    pub generated_content: String,
    #[serde(rename = "type")]
    pub kind: GenerationKind,
}

/// One page of saved posts as returned by `GET /api/history`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryPage {
    pub posts: Vec<StoredPost>,
    pub total: u64,
    pub page: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

/// A frequently used prompt, offered as a starting point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularPrompt {
    #[serde(rename = "_id")]
    pub id: String,
    pub template: TemplateId,
    pub objective: String,
    pub context: String,
    #[serde(rename = "type", default)]
    pub kind: GenerationKind,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub use_count: u64,
}
