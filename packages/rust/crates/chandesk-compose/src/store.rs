//! Desk state persistence backends.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::draft::Draft;
use crate::error::StoreError;
use crate::hashtag::HashtagBook;
use crate::model::AuthSession;

/// Everything the desk keeps between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskState {
    /// Unpublished post.
    pub draft: Draft,
    /// Saved hashtags.
    pub hashtags: HashtagBook,
    /// Logged-in operator, if any.
    pub session: Option<AuthSession>,
}

/// Persistence abstraction for [`DeskState`].
pub trait DeskStore: Send + Sync {
    /// Backend identifier for logs.
    fn backend_name(&self) -> &'static str;

    /// Current state; the default state when nothing was saved yet.
    fn load(&self) -> Result<DeskState, StoreError>;

    /// Replaces the saved state.
    fn save(&self, state: &DeskState) -> Result<(), StoreError>;

    /// Loads, applies `change`, saves, and returns the saved state.
    fn update(&self, change: &mut dyn FnMut(&mut DeskState)) -> Result<DeskState, StoreError> {
        let mut state = self.load()?;
        change(&mut state);
        self.save(&state)?;
        Ok(state)
    }
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the file at `path`; nothing is touched until used.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// State file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl DeskStore for JsonFileStore {
    fn backend_name(&self) -> &'static str {
        "json-file"
    }

    fn load(&self) -> Result<DeskState, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no desk state yet");
                return Ok(DeskState::default());
            }
            Err(error) => return Err(self.io_error(error)),
        };
        if raw.trim().is_empty() {
            return Ok(DeskState::default());
        }
        serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, state: &DeskState) -> Result<(), StoreError> {
        let payload = serde_json::to_string_pretty(state)?;
        atomic_write_text(&self.path, &payload).map_err(|error| self.io_error(error))?;
        debug!(path = %self.path.display(), "saved desk state");
        Ok(())
    }
}

/// Writes `content` through a temp file in the same directory, then renames
/// it over `path`. Parent directories are created.
fn atomic_write_text(path: &Path, content: &str) -> std::io::Result<()> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("desk.json");
    let temp_path = parent.join(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4()));

    let written =
        write_and_sync(&temp_path, content).and_then(|()| std::fs::rename(&temp_path, path));
    if written.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }
    written
}

fn write_and_sync(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}

/// In-process store, mainly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<DeskState>,
}

impl MemoryStore {
    /// Store seeded with `state`.
    #[must_use]
    pub fn with_state(state: DeskState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }
}

impl DeskStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn load(&self) -> Result<DeskState, StoreError> {
        self.state
            .lock()
            .map(|state| state.clone())
            .map_err(|_| StoreError::Poisoned)
    }

    fn save(&self, state: &DeskState) -> Result<(), StoreError> {
        let mut guard = self.state.lock().map_err(|_| StoreError::Poisoned)?;
        *guard = state.clone();
        Ok(())
    }
}
