//! Paginated, searchable view over the signed-in user's saved posts.

use std::sync::Arc;

use contentai_core::clipboard::Clipboard;
use contentai_core::post::{HistoryPage, PopularPrompt, StoredPost};
use contentai_core::{ContentError, Result};
use contentai_interaction::ContentApi;

const LIST_CONTEXT: &str = "Loading history";
const DELETE_CONTEXT: &str = "Deleting post";
const COPY_CONTEXT: &str = "Copying content";
const POPULAR_CONTEXT: &str = "Loading popular prompts";

pub struct HistoryBrowser {
    api: ContentApi,
    clipboard: Arc<dyn Clipboard>,
    posts: Vec<StoredPost>,
    total: u64,
    page: u32,
    page_size: u32,
    total_pages: u32,
    search: Option<String>,
    last_error: Option<String>,
}

impl HistoryBrowser {
    pub fn new(api: ContentApi, clipboard: Arc<dyn Clipboard>, page_size: u32) -> Self {
        Self {
            api,
            clipboard,
            posts: Vec::new(),
            total: 0,
            page: 1,
            page_size: page_size.max(1),
            total_pages: 1,
            search: None,
            last_error: None,
        }
    }

    /// Loads one page of history.
    ///
    /// Pages are 1-based and `0` is read as `1`. A page past the end is
    /// clamped to the last page the backend reports.
    pub async fn list(
        &mut self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> Result<&[StoredPost]> {
        let page_size = page_size.max(1);
        let search = search
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string);

        let mut page = page.max(1);
        let mut fetched = self.fetch(page, page_size, search.as_deref()).await?;
        let mut total_pages = fetched.total_pages.max(1);

        if page > total_pages {
            tracing::debug!(page, total_pages, "Requested page is past the end, clamping");
            page = total_pages;
            fetched = self.fetch(page, page_size, search.as_deref()).await?;
            total_pages = fetched.total_pages.max(1);
        }

        self.posts = fetched.posts;
        self.total = fetched.total;
        self.page = page;
        self.page_size = page_size;
        self.total_pages = total_pages;
        self.search = search;
        self.last_error = None;

        Ok(&self.posts)
    }

    async fn fetch(
        &mut self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> Result<HistoryPage> {
        let skip = u64::from(page - 1) * u64::from(page_size);
        self.api
            .history(page_size, skip, search)
            .await
            .map_err(|e| self.record(LIST_CONTEXT, e))
    }

    /// Reloads the current page with the current search.
    pub async fn refresh(&mut self) -> Result<&[StoredPost]> {
        let search = self.search.clone();
        self.list(self.page, self.page_size, search.as_deref()).await
    }

    pub async fn next_page(&mut self) -> Result<&[StoredPost]> {
        let search = self.search.clone();
        let page = (self.page + 1).min(self.total_pages);
        self.list(page, self.page_size, search.as_deref()).await
    }

    pub async fn previous_page(&mut self) -> Result<&[StoredPost]> {
        let search = self.search.clone();
        let page = self.page.saturating_sub(1).max(1);
        self.list(page, self.page_size, search.as_deref()).await
    }

    /// Deletes a post on the backend, then drops it from the loaded page.
    pub async fn remove(&mut self, id: &str) -> Result<()> {
        if let Err(e) = self.api.delete_post(id).await {
            return Err(self.record(DELETE_CONTEXT, e));
        }

        let before = self.posts.len();
        self.posts.retain(|post| post.id != id);
        if self.posts.len() < before {
            self.total = self.total.saturating_sub(1);
        }
        tracing::info!(post_id = id, "Deleted post");
        Ok(())
    }

    /// Puts `content` on the clipboard. Failures are recorded and returned.
    pub fn copy(&mut self, content: &str) -> Result<()> {
        self.clipboard
            .set_text(content)
            .map_err(|e| self.record(COPY_CONTEXT, e))
    }

    /// Copies the generated content of a post on the loaded page.
    pub fn copy_post(&mut self, id: &str) -> Result<()> {
        let Some(content) = self
            .find(id)
            .map(|post| post.generated_content.clone())
        else {
            let e = ContentError::validation(format!("Post {} is not on the current page", id));
            return Err(self.record(COPY_CONTEXT, e));
        };
        self.copy(&content)
    }

    pub async fn popular_prompts(&mut self, limit: u32) -> Result<Vec<PopularPrompt>> {
        self.api
            .popular_prompts(limit)
            .await
            .map_err(|e| self.record(POPULAR_CONTEXT, e))
    }

    fn record(&mut self, context: &str, error: ContentError) -> ContentError {
        let message = error.user_message(context);
        tracing::warn!("{}", message);
        self.last_error = Some(message);
        error
    }

    pub fn find(&self, id: &str) -> Option<&StoredPost> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn posts(&self) -> &[StoredPost] {
        &self.posts
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
