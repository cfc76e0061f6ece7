//! Session context holding the bearer token for the current staff login.
//!
//! A [`Session`] is created once by the SDK builder and injected into the
//! [`ApiClient`](crate::http::ApiClient). Only three paths mutate it: login
//! stores a token, logout clears it, and a `401` response clears it. When a
//! token file is configured the token survives restarts, mirroring the
//! browser's persistent storage.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::Result;

/// Bearer-token holder shared by every request of one SDK instance.
#[derive(Debug, Default)]
pub struct Session {
    token: Mutex<Option<String>>,
    file: Option<PathBuf>,
}

impl Session {
    /// A session that lives only as long as this process.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// A session backed by a token file.
    ///
    /// An existing, non-empty token file is loaded immediately so a previous
    /// login is picked up. The file is not created until a token is stored.
    pub fn persistent<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let token = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        } else {
            None
        };
        debug!(path = %path.display(), restored = token.is_some(), "opened session file");
        Ok(Self {
            token: Mutex::new(token),
            file: Some(path),
        })
    }

    /// Current bearer token, if logged in.
    pub fn token(&self) -> Option<String> {
        self.lock().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().is_some()
    }

    /// Path of the backing token file, if any.
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Store a freshly issued token (login).
    ///
    /// The token file is written through a temp file and renamed, so an
    /// interrupted write never leaves a truncated token behind.
    pub(crate) fn establish(&self, token: &str) -> Result<()> {
        if let Some(path) = &self.file {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            fs::create_dir_all(dir)?;
            let mut tmp = NamedTempFile::new_in(dir)?;
            tmp.write_all(token.as_bytes())?;
            tmp.persist(path).map_err(|e| e.error)?;
        }
        *self.lock() = Some(token.to_string());
        Ok(())
    }

    /// Drop the token (logout or authorization failure).
    pub(crate) fn clear(&self) {
        *self.lock() = None;
        if let Some(path) = &self.file {
            if path.exists() {
                if let Err(e) = fs::remove_file(path) {
                    warn!(path = %path.display(), error = %e, "failed to remove session file");
                }
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        // A poisoned lock still holds a valid Option<String>.
        self.token.lock().unwrap_or_else(|e| e.into_inner())
    }
}
