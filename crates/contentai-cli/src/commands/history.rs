use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use contentai_application::HistoryBrowser;
use contentai_core::post::StoredPost;

use super::App;

pub async fn list(app: &App, page: u32, page_size: Option<u32>, search: Option<&str>) -> Result<()> {
    let mut browser = app.history();
    let page_size = page_size.unwrap_or(app.config.history_page_size);

    if let Err(e) = browser.list(page, page_size, search).await.map(|_| ()) {
        report(&browser);
        return Err(e.into());
    }

    if browser.posts().is_empty() {
        println!("No saved posts");
    }
    for post in browser.posts() {
        print_post(post);
    }
    println!(
        "Page {} of {} ({} posts)",
        browser.page(),
        browser.total_pages(),
        browser.total()
    );
    Ok(())
}

pub async fn delete(app: &App, id: &str, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete post {}?", id))? {
        println!("Cancelled");
        return Ok(());
    }

    let mut browser = app.history();
    if let Err(e) = browser.remove(id).await {
        report(&browser);
        return Err(e.into());
    }
    println!("Deleted {}", id);
    Ok(())
}

pub async fn copy(app: &App, id: &str, page: u32, search: Option<&str>) -> Result<()> {
    let mut browser = app.history();
    let page_size = app.config.history_page_size;

    let outcome = browser
        .list(page, page_size, search)
        .await
        .map(|_| ())
        .and_then(|()| browser.copy_post(id));
    if let Err(e) = outcome {
        report(&browser);
        return Err(e.into());
    }
    println!("Copied {} to the clipboard", id);
    Ok(())
}

pub async fn popular(app: &App, limit: Option<u32>) -> Result<()> {
    let mut browser = app.history();
    let limit = limit.unwrap_or(app.config.popular_prompt_limit);

    let prompts = match browser.popular_prompts(limit).await {
        Ok(prompts) => prompts,
        Err(e) => {
            report(&browser);
            return Err(e.into());
        }
    };

    for prompt in prompts {
        println!(
            "[{}] {} ({} uses)\n    {}\n    {}",
            prompt.template, prompt.kind, prompt.use_count, prompt.objective, prompt.context
        );
    }
    Ok(())
}

fn print_post(post: &StoredPost) {
    println!(
        "{}  {}  {}/{}",
        post.id,
        post.created_at.format("%Y-%m-%d %H:%M"),
        post.template,
        post.kind
    );
    println!("  Objective: {}", post.objective);
    println!("  Context:   {}", post.context);
    for line in post.generated_content.lines() {
        println!("  | {}", line);
    }
    println!();
}

fn report(browser: &HistoryBrowser) {
    if let Some(message) = browser.last_error() {
        eprintln!("{}", message);
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush().context("Failed to write prompt")?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
