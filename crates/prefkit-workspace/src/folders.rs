//! Persisted folder-expansion state.
//!
//! Stores the set of folded folder ids as a snapshot document. A folder is
//! expanded unless its id is in the folded set, so a missing document means
//! everything is expanded.

use prefkit_registry::{SnapshotStore, Value};
use serde_json::json;
use tracing::debug;

use crate::error::WorkspaceResult;

/// Document name the folded set is stored under.
pub const FOLDED_DIRS_DOCUMENT: &str = "folded-dirs.json";

/// Snapshot key holding the folded id list.
const FOLDED_KEY: &str = "folded";

/// Folder-expansion state over a snapshot store.
pub struct FolderStateStore {
    store: Box<dyn SnapshotStore>,
    document: String,
}

impl FolderStateStore {
    /// Create a store persisting under [`FOLDED_DIRS_DOCUMENT`].
    pub fn new(store: Box<dyn SnapshotStore>) -> Self {
        Self {
            store,
            document: FOLDED_DIRS_DOCUMENT.to_string(),
        }
    }

    /// Persist under a different document name.
    pub fn with_document_name(mut self, name: impl Into<String>) -> Self {
        self.document = name.into();
        self
    }

    /// The folded folder ids. A missing document is the empty set.
    pub fn folded_ids(&self) -> WorkspaceResult<Vec<String>> {
        let Some(snapshot) = self.store.load_snapshot(&self.document)? else {
            debug!(document = %self.document, "no folded-dirs document, all folders expanded");
            return Ok(Vec::new());
        };
        let ids = match snapshot.get(FOLDED_KEY) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };
        Ok(ids)
    }

    /// Whether a folder is expanded (not in the folded set).
    pub fn is_expanded(&self, folder_id: &str) -> WorkspaceResult<bool> {
        Ok(!self.folded_ids()?.iter().any(|id| id == folder_id))
    }

    /// Set the expansion state of a folder. Set semantics: folding an
    /// already-folded folder or expanding an already-expanded one is a
    /// no-op on the stored list.
    pub fn set_expanded(&mut self, folder_id: &str, expanded: bool) -> WorkspaceResult<()> {
        let mut ids = self.folded_ids()?;
        if expanded {
            ids.retain(|id| id != folder_id);
        } else if !ids.iter().any(|id| id == folder_id) {
            ids.push(folder_id.to_string());
        }

        let mut snapshot = prefkit_registry::Snapshot::new();
        snapshot.insert(FOLDED_KEY.to_string(), json!(ids));
        self.store.save_snapshot(&self.document, &snapshot)?;
        Ok(())
    }
}
