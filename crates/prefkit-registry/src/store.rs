//! Snapshot persistence boundary.
//!
//! The registry is agnostic to the storage medium; it talks to a
//! [`SnapshotStore`] and nothing else. A missing document is `Ok(None)`,
//! never an error. Two implementations ship with the crate: a JSON-file
//! store under the platform config directory, and an in-memory store for
//! tests and embedders with their own persistence.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use prefkit_core::{shared, Shared};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::model::Snapshot;

/// Named load/save/remove of JSON snapshot documents.
pub trait SnapshotStore {
    /// Load the named snapshot. Missing documents are `Ok(None)`.
    fn load_snapshot(&self, name: &str) -> StoreResult<Option<Snapshot>>;

    /// Save the named snapshot, replacing any previous content.
    fn save_snapshot(&mut self, name: &str, snapshot: &Snapshot) -> StoreResult<()>;

    /// Remove the named snapshot. Removing a missing document is a no-op.
    fn remove_snapshot(&mut self, name: &str) -> StoreResult<()>;
}

/// Stores each snapshot as a JSON file in a base directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    base_dir: PathBuf,
}

impl JsonFileStore {
    /// Store under the platform config directory, in a `prefkit` subfolder.
    pub fn new() -> StoreResult<Self> {
        let base = dirs::config_dir()
            .ok_or_else(|| StoreError::ConfigDirectory("no config directory".to_string()))?;
        Ok(Self::with_dir(base.join("prefkit")))
    }

    /// Store under an explicit directory.
    pub fn with_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The directory snapshots are written to.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn document_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }
}

impl SnapshotStore for JsonFileStore {
    fn load_snapshot(&self, name: &str) -> StoreResult<Option<Snapshot>> {
        let path = self.document_path(name);
        if !path.exists() {
            debug!("no stored snapshot at {}", path.display());
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        Ok(Some(snapshot))
    }

    fn save_snapshot(&mut self, name: &str, snapshot: &Snapshot) -> StoreResult<()> {
        fs::create_dir_all(&self.base_dir)?;
        let path = self.document_path(name);
        let content = serde_json::to_string_pretty(snapshot)?;
        fs::write(&path, content)?;
        debug!("saved snapshot to {}", path.display());
        Ok(())
    }

    fn remove_snapshot(&mut self, name: &str) -> StoreResult<()> {
        let path = self.document_path(name);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// Keeps snapshots in a shared map. Clones share the same documents, which
/// lets a test hold a view onto a store owned by a registry.
#[derive(Clone, Default)]
pub struct MemoryStore {
    documents: Shared<HashMap<String, Snapshot>>,
    fail_operations: Shared<bool>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            documents: shared(HashMap::new()),
            fail_operations: shared(false),
        }
    }

    /// Make subsequent operations fail, for error-propagation tests.
    pub fn set_fail_operations(&self, fail: bool) {
        *self.fail_operations.borrow_mut() = fail;
    }

    /// The stored snapshot under `name`, if any.
    pub fn document(&self, name: &str) -> Option<Snapshot> {
        self.documents.borrow().get(name).cloned()
    }

    /// Whether a snapshot is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.documents.borrow().contains_key(name)
    }

    /// Insert a snapshot directly, bypassing the trait.
    pub fn insert(&self, name: impl Into<String>, snapshot: Snapshot) {
        self.documents.borrow_mut().insert(name.into(), snapshot);
    }

    fn check_failure(&self) -> StoreResult<()> {
        if *self.fail_operations.borrow() {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::Other,
                "simulated store failure",
            )));
        }
        Ok(())
    }
}

impl SnapshotStore for MemoryStore {
    fn load_snapshot(&self, name: &str) -> StoreResult<Option<Snapshot>> {
        self.check_failure()?;
        Ok(self.documents.borrow().get(name).cloned())
    }

    fn save_snapshot(&mut self, name: &str, snapshot: &Snapshot) -> StoreResult<()> {
        self.check_failure()?;
        self.documents
            .borrow_mut()
            .insert(name.to_string(), snapshot.clone());
        Ok(())
    }

    fn remove_snapshot(&mut self, name: &str) -> StoreResult<()> {
        self.check_failure()?;
        self.documents.borrow_mut().remove(name);
        Ok(())
    }
}
