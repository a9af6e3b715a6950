//! Persistence backends for the logged-in identity.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{LedgerError, LedgerResult};

use super::identity::Identity;

/// Where a [`super::Session`] keeps its identity between restarts.
pub trait SessionStore {
    /// Returns the stored identity, if any.
    fn load(&self) -> LedgerResult<Option<Identity>>;

    /// Replaces the stored identity.
    fn save(&self, identity: &Identity) -> LedgerResult<()>;

    /// Removes the stored identity. Clearing an empty store succeeds.
    fn clear(&self) -> LedgerResult<()>;
}

fn store_error(context: &str, error: impl std::fmt::Display) -> LedgerError {
    LedgerError::SessionStore {
        message: format!("{context}: {error}"),
    }
}

/// Keeps the identity in memory only.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    identity: Mutex<Option<Identity>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> LedgerResult<std::sync::MutexGuard<'_, Option<Identity>>> {
        self.identity
            .lock()
            .map_err(|e| store_error("session lock poisoned", e))
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> LedgerResult<Option<Identity>> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, identity: &Identity) -> LedgerResult<()> {
        *self.slot()? = Some(identity.clone());
        Ok(())
    }

    fn clear(&self) -> LedgerResult<()> {
        *self.slot()? = None;
        Ok(())
    }
}

/// Keeps the identity as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store backed by the file at `path`. The file need not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> LedgerResult<Option<Identity>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(store_error("failed to read session file", e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| store_error("corrupt session file", e))
    }

    fn save(&self, identity: &Identity) -> LedgerResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| store_error("failed to create session directory", e))?;
        }
        let json = serde_json::to_string_pretty(identity)
            .map_err(|e| store_error("failed to encode session", e))?;
        fs::write(&self.path, json).map_err(|e| store_error("failed to write session file", e))
    }

    fn clear(&self) -> LedgerResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(store_error("failed to remove session file", e)),
        }
    }
}
