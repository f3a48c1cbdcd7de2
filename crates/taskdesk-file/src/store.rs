//! JSON-file token storage.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use taskdesk_core::error::StorageError;
use taskdesk_core::{Result, SessionToken, TokenStore};

#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

/// Key under which the token is stored.
pub const TOKEN_KEY: &str = "authToken";

/// On-disk layout of the token file.
#[derive(Serialize, Deserialize)]
struct StoredToken {
    #[serde(rename = "authToken")]
    auth_token: String,
}

/// Token storage backed by a single JSON file.
///
/// The file holds `{"authToken": "..."}`. A missing file means no token.
/// Writes hold an exclusive lock on the file and leave it readable only by
/// the owner on Unix.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store for the given file. Nothing is touched on disk until
    /// the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            location: self.path.display().to_string(),
            source,
        }
    }

    fn corrupt(&self, reason: impl Into<String>) -> StorageError {
        StorageError::Corrupt {
            location: self.path.display().to_string(),
            reason: reason.into(),
        }
    }
}

impl TokenStore for FileTokenStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Option<SessionToken>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No token file");
                return Ok(None);
            }
            Err(e) => return Err(self.io_error(e).into()),
        };

        if json.trim().is_empty() {
            return Ok(None);
        }

        let stored: StoredToken =
            serde_json::from_str(&json).map_err(|e| self.corrupt(e.to_string()))?;

        let token = SessionToken::new(stored.auth_token);
        if token.is_none() {
            warn!("Token file holds an empty token");
        }
        Ok(token)
    }

    #[instrument(skip(self, token), fields(path = %self.path.display()))]
    fn save(&self, token: &SessionToken) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let stored = StoredToken {
            auth_token: token.as_str().to_string(),
        };
        let json = serde_json::to_string_pretty(&stored).map_err(|e| self.corrupt(e.to_string()))?;

        let mut options = OpenOptions::new();
        options.create(true).write(true).truncate(false);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&self.path).map_err(|e| self.io_error(e))?;
        file.lock_exclusive().map_err(|e| self.io_error(e))?;

        let written = file
            .set_len(0)
            .and_then(|_| file.write_all(json.as_bytes()))
            .and_then(|_| file.sync_data());

        // Tighten permissions on files created before the mode was applied.
        #[cfg(unix)]
        let written = written.and_then(|_| {
            let mut perms = file.metadata()?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms)
        });

        let unlocked = FileExt::unlock(&file);
        written.map_err(|e| self.io_error(e))?;
        unlocked.map_err(|e| self.io_error(e))?;

        debug!("Token saved");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Token file removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e).into()),
        }
    }
}
