use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use contentai_core::generation::GenerationKind;
use contentai_core::template::TemplateId;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::App;

#[derive(Parser)]
#[command(name = "contentai")]
#[command(about = "ContentAI CLI - generate, save and browse social media content", long_about = None)]
struct Cli {
    /// Backend base URL, overriding config.toml and CONTENTAI_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available content templates
    Templates,
    /// Sign in with a Google identity credential
    Login { credential: String },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Generate a post, an image, or both
    Generate {
        #[arg(long, default_value = "tech-insight")]
        template: TemplateId,
        #[arg(long)]
        objective: String,
        #[arg(long)]
        context: String,
        #[arg(long, default_value = "text")]
        kind: GenerationKind,
        /// Reference document to upload (repeatable)
        #[arg(long = "document")]
        documents: Vec<PathBuf>,
        /// Replace the generated text with text read from stdin
        #[arg(long)]
        edit: bool,
        /// Copy the result to the clipboard
        #[arg(long)]
        copy: bool,
        /// Save the result to history
        #[arg(long)]
        save: bool,
    },
    /// Browse saved posts
    History {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        page_size: Option<u32>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete a saved post
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Copy a saved post to the clipboard
    Copy {
        id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show frequently used prompts
    Popular {
        #[arg(long)]
        limit: Option<u32>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Something went wrong. Please try again.");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let app = App::bootstrap(cli.api_url).await?;

    match cli.command {
        Commands::Templates => commands::templates::list(),
        Commands::Login { credential } => commands::auth::login(&app, &credential).await?,
        Commands::Logout => commands::auth::logout(&app).await?,
        Commands::Whoami => commands::auth::whoami(&app),
        Commands::Generate {
            template,
            objective,
            context,
            kind,
            documents,
            edit,
            copy,
            save,
        } => {
            let args = commands::generate::GenerateArgs {
                template,
                objective,
                context,
                kind,
                documents,
                edit,
                copy,
                save,
            };
            commands::generate::run(&app, args).await?
        }
        Commands::History {
            page,
            page_size,
            search,
        } => commands::history::list(&app, page, page_size, search.as_deref()).await?,
        Commands::Delete { id, yes } => commands::history::delete(&app, &id, yes).await?,
        Commands::Copy { id, page, search } => {
            commands::history::copy(&app, &id, page, search.as_deref()).await?
        }
        Commands::Popular { limit } => commands::history::popular(&app, limit).await?,
    }

    Ok(())
}
