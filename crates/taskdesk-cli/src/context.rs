//! Wiring shared by every command: backend, token file, session store.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use taskdesk_core::{ApiUrl, SessionStore};
use taskdesk_file::FileTokenStore;
use taskdesk_http::HttpAuthBackend;

use crate::cli::Cli;

/// Session store as used by the CLI.
pub type CliStore = SessionStore<HttpAuthBackend>;

/// Global options every command needs.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub api: String,
    pub token_file: Option<PathBuf>,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            api: cli.api.clone(),
            token_file: cli.token_file.clone(),
        }
    }

    /// Path of the token file, defaulting to the user data directory.
    pub fn token_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.token_file {
            return Ok(path.clone());
        }

        let dirs = ProjectDirs::from("", "", "taskdesk")
            .context("Could not determine data directory")?;
        Ok(dirs.data_dir().join("token.json"))
    }

    /// Build a session store without resolving it.
    pub fn store(&self) -> Result<CliStore> {
        let api = ApiUrl::new(&self.api).context("Invalid API URL")?;
        let path = self.token_path()?;
        debug!(api = %api, token_file = %path.display(), "Opening session store");

        let backend = HttpAuthBackend::new(api).context("Failed to create HTTP client")?;
        Ok(SessionStore::new(backend, Arc::new(FileTokenStore::new(path))))
    }

    /// Build a session store and resolve any persisted token.
    pub async fn resolved_store(&self) -> Result<CliStore> {
        let store = self.store()?;
        store.initialize().await;
        Ok(store)
    }
}
