pub mod auth;
pub mod generate;
pub mod history;
pub mod templates;

use std::sync::Arc;

use anyhow::{Context, Result};
use contentai_application::{AuthService, GenerationWorkflow, HistoryBrowser};
use contentai_core::auth::SessionStore;
use contentai_core::config::ClientConfig;
use contentai_infrastructure::{ConfigService, SystemClipboard, TomlSessionRepository};
use contentai_interaction::{ContentApi, HttpImageProbe, HttpTransport, ImageProbe};

/// Everything a command needs, wired from the loaded configuration.
pub struct App {
    pub config: ClientConfig,
    pub api: ContentApi,
    pub auth: AuthService,
}

impl App {
    /// Loads configuration, wires the HTTP stack and restores any stored session.
    pub async fn bootstrap(api_url: Option<String>) -> Result<Self> {
        let mut config = ConfigService::new()
            .load()
            .context("Failed to load configuration")?;
        if let Some(url) = api_url {
            config = config.with_base_url(url);
        }
        tracing::debug!(base_url = %config.base_url, "Using backend");

        let store = SessionStore::new();
        let transport = HttpTransport::new(config.base_url.clone(), store.context());
        let api = ContentApi::new(Arc::new(transport));

        let repository =
            TomlSessionRepository::new_default().context("Failed to locate session file")?;
        let auth = AuthService::new(api.clone(), Arc::new(repository), store);
        auth.restore().await;

        Ok(Self { config, api, auth })
    }

    pub fn workflow(&self) -> GenerationWorkflow {
        let probe: Option<Arc<dyn ImageProbe>> = if self.config.verify_images {
            Some(Arc::new(HttpImageProbe::new()))
        } else {
            None
        };
        GenerationWorkflow::new(self.api.clone(), probe, self.auth.context())
    }

    pub fn history(&self) -> HistoryBrowser {
        HistoryBrowser::new(
            self.api.clone(),
            Arc::new(SystemClipboard),
            self.config.history_page_size,
        )
    }
}
