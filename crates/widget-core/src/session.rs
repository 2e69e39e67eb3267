//! Session id persistence.
//!
//! One id per visitor, created lazily on the first analytics call and
//! persisted so it survives widget opens/closes. The browser widget keeps
//! it in local storage; here the same contract is a small store trait with
//! a file-backed implementation.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::error::WidgetError;

/// Persistence for the per-visitor session id.
///
/// Implementations are read-then-write; concurrent widgets sharing one
/// store is a non-goal (one widget per host is assumed).
pub trait SessionStore: Send + Sync {
    /// Load the persisted session id, if any.
    fn load(&self) -> Result<Option<String>, WidgetError>;

    /// Persist the session id.
    fn store(&self, session_id: &str) -> Result<(), WidgetError>;
}

/// Generate a fresh session id.
pub fn generate_session_id() -> String {
    format!("npo-{}", Uuid::new_v4())
}

/// Load the stored session id or generate and persist a new one.
///
/// Store failures degrade to an ephemeral id rather than erroring: a
/// visitor with a broken store still gets correlated within one mount.
pub fn load_or_create(store: &dyn SessionStore) -> String {
    match store.load() {
        Ok(Some(id)) => id,
        Ok(None) => {
            let id = generate_session_id();
            if let Err(e) = store.store(&id) {
                debug!("session store write failed, id will be ephemeral: {}", e);
            }
            id
        }
        Err(e) => {
            debug!("session store read failed, id will be ephemeral: {}", e);
            generate_session_id()
        }
    }
}

/// File-backed session store. The whole file is the id.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<String>, WidgetError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let trimmed = content.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(trimmed.to_string()))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(WidgetError::Session(format!(
                "failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn store(&self, session_id: &str) -> Result<(), WidgetError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                WidgetError::Session(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }
        fs::write(&self.path, session_id).map_err(|e| {
            WidgetError::Session(format!("failed to write {}: {}", self.path.display(), e))
        })
    }
}

/// In-memory session store for tests and hosts without persistence.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    id: std::sync::Mutex<Option<String>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<String>, WidgetError> {
        Ok(self.id.lock().map_err(poisoned)?.clone())
    }

    fn store(&self, session_id: &str) -> Result<(), WidgetError> {
        *self.id.lock().map_err(poisoned)? = Some(session_id.to_string());
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> WidgetError {
    WidgetError::Session("session store lock poisoned".to_string())
}
