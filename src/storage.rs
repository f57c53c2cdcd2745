//! Persisted UI state: the pasted rosters and the active filters.
//!
//! The matcher never touches storage. Presentation code (the HTTP API, the
//! CLI) loads and saves through a [StateStore] it is handed.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::matcher::MatchClass;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub attackers_input: String,
    #[serde(default)]
    pub targets_input: String,
    #[serde(default = "default_min_class")]
    pub min_class: MatchClass,
    #[serde(default)]
    pub include_unmatched: bool,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

fn default_min_class() -> MatchClass {
    MatchClass::Even
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            attackers_input: String::new(),
            targets_input: String::new(),
            min_class: default_min_class(),
            include_unmatched: false,
            saved_at: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("state io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("state encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait StateStore: Send + Sync {
    /// Saved state, or `None` when nothing usable is stored.
    fn load(&self) -> Option<AppState>;
    fn save(&self, state: &AppState) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

pub const DEFAULT_STATE_PATH: &str = "data/state.json";

/// JSON file on disk. Writes go to a sibling temp file first and are renamed
/// into place.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Option<AppState> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "could not read saved state");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(state) => Some(state),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring corrupt saved state");
                None
            }
        }
    }

    fn save(&self, state: &AppState) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let payload = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(payload.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Option<AppState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot is only ever replaced whole, so a panic in another holder
    /// cannot leave it half-written and a poisoned lock is safe to reuse.
    fn slot(&self) -> MutexGuard<'_, Option<AppState>> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("memory state lock was poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Option<AppState> {
        self.slot().clone()
    }

    fn save(&self, state: &AppState) -> Result<(), StorageError> {
        *self.slot() = Some(state.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot() = None;
        Ok(())
    }
}

/// Stamp `state` with the current time and save it.
pub fn save_stamped(
    store: &dyn StateStore,
    mut state: AppState,
) -> Result<AppState, StorageError> {
    state.saved_at = Some(Utc::now());
    store.save(&state)?;
    Ok(state)
}
