//! Generation workflow.
//!
//! Drives one generation at a time through
//! `Idle → Submitting → {Succeeded, Failed}` and publishes every transition
//! on a watch channel. A `full` request runs the text and image sub-flows
//! concurrently and succeeds when either of them does.

use std::sync::Arc;

use contentai_core::auth::SessionContext;
use contentai_core::clipboard::Clipboard;
use contentai_core::generation::{
    GenerationKind, GenerationRequest, GenerationResult, WorkflowSnapshot, WorkflowState,
};
use contentai_core::post::NewPost;
use contentai_core::{ContentError, Result};
use contentai_interaction::{ContentApi, ImageGeneration, ImageProbe, TextGeneration};
use tokio::sync::watch;

const TEXT_CONTEXT: &str = "Post generation";
const IMAGE_CONTEXT: &str = "Image generation";
const SAVE_CONTEXT: &str = "Saving content";
const COPY_CONTEXT: &str = "Copying content";
pub const BOTH_FAILED_MESSAGE: &str = "Failed to generate both image and text";

/// What `save` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(NewPost),
    /// There was no generated content to persist.
    NothingToSave,
}

pub struct GenerationWorkflow {
    api: ContentApi,
    /// `None` skips the loadability check.
    image_probe: Option<Arc<dyn ImageProbe>>,
    session: SessionContext,
    state: watch::Sender<WorkflowSnapshot>,
    /// Request that produced the current result. Only set after a success.
    request: Option<GenerationRequest>,
}

impl GenerationWorkflow {
    pub fn new(
        api: ContentApi,
        image_probe: Option<Arc<dyn ImageProbe>>,
        session: SessionContext,
    ) -> Self {
        let (state, _) = watch::channel(WorkflowSnapshot::default());
        Self {
            api,
            image_probe,
            session,
            state,
            request: None,
        }
    }

    /// Receiver that sees every state transition.
    pub fn subscribe(&self) -> watch::Receiver<WorkflowSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        self.state.borrow().clone()
    }

    /// Validates `request` and runs the sub-flows its kind asks for.
    ///
    /// Returns the result that was stored, or the error that ended the run.
    /// Either way the outcome is also visible through [`snapshot`](Self::snapshot).
    pub async fn generate(&mut self, request: GenerationRequest) -> Result<GenerationResult> {
        self.request = None;

        if let Err(e) = request.validate() {
            let message = e.to_string();
            return Err(self.fail(message, e));
        }

        let kind = request.kind;
        tracing::info!(template = %request.template, %kind, "Submitting generation request");
        self.state.send_modify(|snapshot| {
            snapshot.state = WorkflowState::Submitting;
            snapshot.kind = kind;
            snapshot.error = None;
            if kind != GenerationKind::Full {
                snapshot.result = GenerationResult::default();
            }
        });

        let outcome = match kind {
            GenerationKind::Text => self.generate_text(&request).await,
            GenerationKind::Image => self.generate_image(&request).await,
            GenerationKind::Full => self.generate_full(&request).await,
        };
        if outcome.is_ok() {
            self.request = Some(request);
        }
        outcome
    }

    async fn generate_text(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        match run_text(&self.api, request).await {
            Ok(text) => Ok(self.succeed(GenerationResult::text(text), None)),
            Err(e) => Err(self.fail(e.user_message(TEXT_CONTEXT), e)),
        }
    }

    async fn generate_image(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        match run_image(&self.api, self.image_probe.as_deref(), request).await {
            Ok(url) => Ok(self.succeed(GenerationResult::image(url), None)),
            Err(e) => Err(self.fail(e.user_message(IMAGE_CONTEXT), e)),
        }
    }

    async fn generate_full(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let (text, image) = tokio::join!(
            run_text(&self.api, request),
            run_image(&self.api, self.image_probe.as_deref(), request),
        );

        match (text, image) {
            (Err(text_err), Err(image_err)) => {
                tracing::warn!("Both sub-flows failed: {}; {}", text_err, image_err);
                Err(self.fail(
                    BOTH_FAILED_MESSAGE.to_string(),
                    ContentError::Multiple(vec![text_err, image_err]),
                ))
            }
            (text, image) => {
                // One side may still have failed; surface it next to the result.
                let partial_error = match (&text, &image) {
                    (Err(e), _) => Some(e.user_message(TEXT_CONTEXT)),
                    (_, Err(e)) => Some(e.user_message(IMAGE_CONTEXT)),
                    _ => None,
                };
                let result = GenerationResult {
                    text: text.ok(),
                    image_url: image.ok(),
                };
                Ok(self.succeed(result, partial_error))
            }
        }
    }

    fn succeed(&self, result: GenerationResult, error: Option<String>) -> GenerationResult {
        tracing::info!(
            has_text = result.text.is_some(),
            has_image = result.image_url.is_some(),
            "Generation succeeded"
        );
        self.state.send_modify(|snapshot| {
            snapshot.state = WorkflowState::Succeeded;
            snapshot.result = result.clone();
            snapshot.error = error;
        });
        result
    }

    fn fail(&self, message: String, error: ContentError) -> ContentError {
        tracing::warn!("{}", message);
        self.state.send_modify(|snapshot| {
            snapshot.state = WorkflowState::Failed;
            snapshot.result = GenerationResult::default();
            snapshot.error = Some(message);
        });
        error
    }

    /// Replaces the generated text of a successful run, e.g. after the user
    /// touched it up. Image-only results have no text to edit.
    pub fn edit_text(&self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        let snapshot = self.snapshot();
        if snapshot.state != WorkflowState::Succeeded || snapshot.kind == GenerationKind::Image {
            return Err(ContentError::validation("There is no generated text to edit"));
        }
        if text.trim().is_empty() {
            return Err(ContentError::validation("Generated text must not be empty"));
        }

        self.state.send_modify(|snapshot| snapshot.result.text = Some(text));
        tracing::debug!("Generated text edited");
        Ok(())
    }

    /// Copies the current result to the clipboard, picking the content the
    /// same way `save` does.
    pub fn copy_result(&self, clipboard: &dyn Clipboard) -> Result<()> {
        let snapshot = self.snapshot();
        let content = match snapshot.state {
            WorkflowState::Succeeded => snapshot.result.content_for(snapshot.kind),
            _ => None,
        };
        let Some(content) = content else {
            return Err(ContentError::validation("There is no generated content to copy"));
        };

        if let Err(e) = clipboard.set_text(&content) {
            let message = e.user_message(COPY_CONTEXT);
            tracing::warn!("{}", message);
            self.state.send_modify(|snapshot| snapshot.error = Some(message));
            return Err(e);
        }
        Ok(())
    }

    /// Persists the current result for the signed-in user.
    ///
    /// The session is checked before anything else, so a signed-out call
    /// never reaches the network.
    pub async fn save(&self) -> Result<SaveOutcome> {
        if !self.session.is_signed_in() {
            let e = ContentError::AuthenticationRequired;
            self.state.send_modify(|snapshot| {
                snapshot.error = Some(e.user_message(SAVE_CONTEXT));
            });
            return Err(e);
        }

        let snapshot = self.snapshot();
        if snapshot.state != WorkflowState::Succeeded {
            return Ok(SaveOutcome::NothingToSave);
        }
        let Some(request) = &self.request else {
            return Ok(SaveOutcome::NothingToSave);
        };
        let Some(generated_content) = snapshot.result.content_for(snapshot.kind) else {
            return Ok(SaveOutcome::NothingToSave);
        };

        let post = NewPost {
            template: request.template,
            objective: request.objective.clone(),
            context: request.context.clone(),
            generated_content,
            kind: snapshot.kind,
        };

        if let Err(e) = self.api.save_post(&post).await {
            let message = e.user_message(SAVE_CONTEXT);
            tracing::warn!("{}", message);
            self.state.send_modify(|snapshot| snapshot.error = Some(message));
            return Err(e);
        }

        tracing::info!(kind = %post.kind, "Saved generated content");
        Ok(SaveOutcome::Saved(post))
    }

    /// Returns to `Idle`, dropping the current result.
    pub fn reset(&mut self) {
        self.request = None;
        self.state.send_replace(WorkflowSnapshot::default());
    }
}

async fn run_text(api: &ContentApi, request: &GenerationRequest) -> Result<String> {
    match api.generate_text(request).await? {
        TextGeneration::Post(post) => Ok(post),
        TextGeneration::Error(message) => Err(ContentError::generation(message)),
    }
}

async fn run_image(
    api: &ContentApi,
    probe: Option<&dyn ImageProbe>,
    request: &GenerationRequest,
) -> Result<String> {
    let url = match api.generate_image(request).await? {
        ImageGeneration::Url(url) => url,
        ImageGeneration::Error(message) => return Err(ContentError::generation(message)),
    };

    if let Some(probe) = probe {
        probe.verify(&url).await?;
    }
    Ok(url)
}
