use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use contentai_application::{GenerationWorkflow, SaveOutcome};
use contentai_core::generation::{GenerationKind, GenerationRequest, WorkflowSnapshot, WorkflowState};
use contentai_core::template::TemplateId;
use contentai_infrastructure::SystemClipboard;
use contentai_infrastructure::document_loader::load_document;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::App;

pub struct GenerateArgs {
    pub template: TemplateId,
    pub objective: String,
    pub context: String,
    pub kind: GenerationKind,
    pub documents: Vec<PathBuf>,
    pub edit: bool,
    pub copy: bool,
    pub save: bool,
}

pub async fn run(app: &App, args: GenerateArgs) -> Result<()> {
    let mut documents = Vec::with_capacity(args.documents.len());
    for path in &args.documents {
        let document = load_document(path)
            .await
            .with_context(|| format!("Failed to read document {}", path.display()))?;
        documents.push(document);
    }

    let request = GenerationRequest::new(
        args.template,
        args.objective.clone(),
        args.context.clone(),
        args.kind,
    )
    .with_documents(documents);

    let mut workflow = app.workflow();
    let progress = report_progress(workflow.subscribe());

    let outcome = drive(&mut workflow, request, &args).await;

    // Closing the channel ends the progress task.
    drop(workflow);
    if let Err(e) = progress.await {
        tracing::warn!("Progress reporter stopped: {}", e);
    }
    outcome
}

fn report_progress(mut states: watch::Receiver<WorkflowSnapshot>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while states.changed().await.is_ok() {
            if states.borrow_and_update().state == WorkflowState::Submitting {
                eprintln!("Generating...");
            }
        }
    })
}

async fn drive(
    workflow: &mut GenerationWorkflow,
    request: GenerationRequest,
    args: &GenerateArgs,
) -> Result<()> {
    if let Err(e) = workflow.generate(request).await {
        let snapshot = workflow.snapshot();
        eprintln!("{}", snapshot.error.as_deref().unwrap_or("Generation failed"));
        return Err(e.into());
    }

    print_result(&workflow.snapshot());

    if args.edit {
        eprintln!("Enter the edited text, then end input (Ctrl-D):");
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read edited text")?;
        workflow.edit_text(text.trim_end())?;
        eprintln!("Text updated");
    }

    if args.copy {
        if let Err(e) = workflow.copy_result(&SystemClipboard) {
            eprintln!("{}", workflow.snapshot().error.as_deref().unwrap_or("Copying failed"));
            return Err(e.into());
        }
        eprintln!("Copied to the clipboard");
    }

    if args.save {
        match workflow.save().await {
            Ok(SaveOutcome::Saved(_)) => eprintln!("Saved to history"),
            Ok(SaveOutcome::NothingToSave) => eprintln!("Nothing to save"),
            Err(e) => {
                eprintln!("{}", workflow.snapshot().error.as_deref().unwrap_or("Saving failed"));
                return Err(e.into());
            }
        }
    }

    Ok(())
}

fn print_result(snapshot: &WorkflowSnapshot) {
    if let Some(text) = &snapshot.result.text {
        println!("{}", text);
    }
    if let Some(url) = &snapshot.result.image_url {
        if snapshot.result.text.is_some() {
            println!();
        }
        println!("Image: {}", url);
    }
    if let Some(partial) = &snapshot.error {
        eprintln!("{}", partial);
    }
}
