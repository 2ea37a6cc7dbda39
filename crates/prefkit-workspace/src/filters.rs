//! Persisted filter state.
//!
//! A small validated document remembering the last filter selection.
//! Invalid stored values default field-wise rather than discarding the
//! whole document, and a failed load degrades to the defaults with a
//! warning since the filter selection is never worth an error dialog.

use chrono::{DateTime, Utc};
use prefkit_registry::{Snapshot, SnapshotStore};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::error::WorkspaceResult;

/// Document name the filter state is stored under.
pub const FILTER_STATE_DOCUMENT: &str = "filter-state.json";

/// Which part of the workspace a view is filtered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterRange {
    /// The whole workspace.
    #[default]
    Workspace,
    /// The current notebook.
    Notebook,
    /// The current document.
    Document,
}

/// Which item status a view is filtered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// All items.
    #[default]
    All,
    /// Open items only.
    Todo,
    /// Completed items only.
    Done,
}

/// The remembered filter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// Range filter.
    pub range: FilterRange,
    /// Status filter.
    pub status: StatusFilter,
    /// When the state was last saved.
    pub timestamp: DateTime<Utc>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            range: FilterRange::default(),
            status: StatusFilter::default(),
            timestamp: Utc::now(),
        }
    }
}

/// Filter-state persistence over a snapshot store.
pub struct FilterStateStore {
    store: Box<dyn SnapshotStore>,
    document: String,
}

impl FilterStateStore {
    /// Create a store persisting under [`FILTER_STATE_DOCUMENT`].
    pub fn new(store: Box<dyn SnapshotStore>) -> Self {
        Self {
            store,
            document: FILTER_STATE_DOCUMENT.to_string(),
        }
    }

    /// The saved filter state. Missing documents, store failures, and
    /// invalid fields all default field-wise.
    pub fn load(&self) -> FilterState {
        let defaults = FilterState::default();
        let snapshot = match self.store.load_snapshot(&self.document) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return defaults,
            Err(err) => {
                warn!("failed to load saved filter state: {err}");
                return defaults;
            }
        };

        let field = |key: &str| snapshot.get(key).cloned();
        FilterState {
            range: field("range")
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or(defaults.range),
            status: field("status")
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or(defaults.status),
            timestamp: field("timestamp")
                .and_then(|v| v.as_i64())
                .and_then(DateTime::from_timestamp_millis)
                .unwrap_or(defaults.timestamp),
        }
    }

    /// Save a filter selection, stamping it with the current time.
    pub fn save(&mut self, state: &FilterState) -> WorkspaceResult<()> {
        let mut snapshot = Snapshot::new();
        snapshot.insert("range".to_string(), serde_json::to_value(state.range)?);
        snapshot.insert("status".to_string(), serde_json::to_value(state.status)?);
        snapshot.insert(
            "timestamp".to_string(),
            json!(Utc::now().timestamp_millis()),
        );
        self.store.save_snapshot(&self.document, &snapshot)?;
        Ok(())
    }

    /// Whether a saved state exists.
    pub fn has_saved_state(&self) -> bool {
        matches!(self.store.load_snapshot(&self.document), Ok(Some(_)))
    }

    /// Remove the saved state.
    pub fn clear(&mut self) -> WorkspaceResult<()> {
        self.store.remove_snapshot(&self.document)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prefkit_registry::MemoryStore;

    fn store() -> (FilterStateStore, MemoryStore) {
        let memory = MemoryStore::new();
        (FilterStateStore::new(Box::new(memory.clone())), memory)
    }

    #[test]
    fn test_load_without_saved_state_defaults() {
        let (filters, _) = store();
        assert!(!filters.has_saved_state());

        let state = filters.load();
        assert_eq!(state.range, FilterRange::Workspace);
        assert_eq!(state.status, StatusFilter::All);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (mut filters, _) = store();
        filters
            .save(&FilterState {
                range: FilterRange::Notebook,
                status: StatusFilter::Done,
                timestamp: Utc::now(),
            })
            .unwrap();

        assert!(filters.has_saved_state());
        let state = filters.load();
        assert_eq!(state.range, FilterRange::Notebook);
        assert_eq!(state.status, StatusFilter::Done);
    }

    #[test]
    fn test_invalid_fields_default_field_wise() {
        let (filters, memory) = store();
        let mut snapshot = Snapshot::new();
        snapshot.insert("range".to_string(), json!("galaxy"));
        snapshot.insert("status".to_string(), json!("done"));
        snapshot.insert("timestamp".to_string(), json!("not a number"));
        memory.insert(FILTER_STATE_DOCUMENT, snapshot);

        let state = filters.load();
        assert_eq!(state.range, FilterRange::Workspace);
        assert_eq!(state.status, StatusFilter::Done);
    }

    #[test]
    fn test_load_degrades_on_store_failure() {
        let (filters, memory) = store();
        memory.set_fail_operations(true);
        let state = filters.load();
        assert_eq!(state.range, FilterRange::Workspace);
    }

    #[test]
    fn test_clear_removes_saved_state() {
        let (mut filters, _) = store();
        filters.save(&FilterState::default()).unwrap();
        assert!(filters.has_saved_state());

        filters.clear().unwrap();
        assert!(!filters.has_saved_state());
    }
}
