use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::{fs, io::ErrorKind};

use thiserror::Error;
use tracing::debug;

use crate::project::Project;

/// Default board file, written to the working directory.
pub const DEFAULT_BOARD_FILE: &str = "projects.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write board file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize projects: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result of reading the board file. `Missing` and `Corrupt` both collapse
/// to an empty collection via [`LoadOutcome::into_projects`], but callers
/// that care (and tests) can tell the branches apart.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Vec<Project>),
    Missing,
    Corrupt(String),
}

impl LoadOutcome {
    /// Fail-open: anything other than a clean load is an empty board.
    pub fn into_projects(self) -> Vec<Project> {
        match self {
            LoadOutcome::Loaded(projects) => projects,
            LoadOutcome::Missing | LoadOutcome::Corrupt(_) => Vec::new(),
        }
    }
}

/// Whole-collection persistence. No partial updates: `save` overwrites the
/// entire stored blob every time.
pub trait Storage {
    fn load(&self) -> LoadOutcome;
    fn save(&self, projects: &[Project]) -> Result<(), StorageError>;
}

/// Board file as a pretty-printed JSON array, same shape as the original
/// localStorage blob.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> LoadOutcome {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return LoadOutcome::Missing,
            Err(err) => return LoadOutcome::Corrupt(err.to_string()),
        };
        match serde_json::from_str(&data) {
            Ok(projects) => LoadOutcome::Loaded(projects),
            Err(err) => LoadOutcome::Corrupt(err.to_string()),
        }
    }

    fn save(&self, projects: &[Project]) -> Result<(), StorageError> {
        let data = serde_json::to_string_pretty(projects)?;
        fs::write(&self.path, data).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = projects.len(), "board saved");
        Ok(())
    }
}

/// In-memory stand-in for tests and dry runs.
#[derive(Default)]
pub struct MemoryStorage {
    slot: RefCell<Option<Vec<Project>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> LoadOutcome {
        match &*self.slot.borrow() {
            Some(projects) => LoadOutcome::Loaded(projects.clone()),
            None => LoadOutcome::Missing,
        }
    }

    fn save(&self, projects: &[Project]) -> Result<(), StorageError> {
        *self.slot.borrow_mut() = Some(projects.to_vec());
        Ok(())
    }
}
