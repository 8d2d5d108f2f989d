use serde::{Deserialize, Serialize};

use super::request::GenerationKind;

/// Output of a generation: text, an image reference, or both.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: Option<String>,
    pub image_url: Option<String>,
}

impl GenerationResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            image_url: None,
        }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self {
            text: None,
            image_url: Some(url.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.image_url.is_none()
    }

    /// Content to persist for a result produced by a request of `kind`.
    ///
    /// Returns `None` when there is nothing worth saving.
    pub fn content_for(&self, kind: GenerationKind) -> Option<String> {
        match kind {
            GenerationKind::Text => self.text.clone(),
            GenerationKind::Image => self.image_url.clone(),
            GenerationKind::Full => match (&self.text, &self.image_url) {
                (Some(text), Some(url)) => Some(format!("{}\n\n{}", text, url)),
                (Some(text), None) => Some(text.clone()),
                (None, Some(url)) => Some(url.clone()),
                (None, None) => None,
            },
        }
    }
}

/// Lifecycle of a generation workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Everything a presentation layer needs to render a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkflowSnapshot {
    pub state: WorkflowState,
    pub kind: GenerationKind,
    pub result: GenerationResult,
    /// User-facing message of the last failure, if any.
    pub error: Option<String>,
}

impl WorkflowSnapshot {
    pub fn is_loading(&self) -> bool {
        self.state == WorkflowState::Submitting
    }
}
