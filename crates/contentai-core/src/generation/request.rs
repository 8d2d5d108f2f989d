use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::error::{ContentError, Result};
use crate::template::TemplateId;

/// Whether a request asks for text, an image, or both.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GenerationKind {
    #[default]
    Text,
    Image,
    Full,
}

/// A file attached to a generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Everything needed to ask the backend for a post.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationRequest {
    pub template: TemplateId,
    pub objective: String,
    pub context: String,
    pub documents: Vec<Document>,
    pub kind: GenerationKind,
}

impl GenerationRequest {
    pub fn new(
        template: TemplateId,
        objective: impl Into<String>,
        context: impl Into<String>,
        kind: GenerationKind,
    ) -> Self {
        Self {
            template,
            objective: objective.into(),
            context: context.into(),
            documents: Vec::new(),
            kind,
        }
    }

    pub fn with_documents(mut self, documents: Vec<Document>) -> Self {
        self.documents = documents;
        self
    }

    /// Returns a copy of this request targeting another kind.
    pub fn with_kind(&self, kind: GenerationKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }

    /// Objective and context must both carry text before anything is sent.
    pub fn validate(&self) -> Result<()> {
        if self.objective.trim().is_empty() || self.context.trim().is_empty() {
            return Err(ContentError::validation("Please fill in all required fields"));
        }
        Ok(())
    }
}
