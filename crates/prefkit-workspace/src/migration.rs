//! One-time storage-format migration.
//!
//! Early releases stored the settings document under an unsuffixed name;
//! current releases use the `.json`-suffixed name. On startup the V1
//! document, if present and non-empty, is copied to the V2 name and then
//! removed. Removal failure is only a warning: a leftover V1 document is
//! harmless, losing the copy would not be.

use prefkit_registry::SnapshotStore;
use tracing::{debug, info, warn};

use crate::error::WorkspaceResult;

/// Unsuffixed V1 settings document name.
pub const SETTINGS_DOCUMENT_V1: &str = "settings";

/// Suffixed V2 settings document name.
pub const SETTINGS_DOCUMENT_V2: &str = "settings.json";

/// Migrate a V1 settings document to its V2 name. Returns whether a
/// migration happened; running again after a successful migration is a
/// no-op.
pub fn migrate_settings(
    store: &mut dyn SnapshotStore,
    v1_name: &str,
    v2_name: &str,
) -> WorkspaceResult<bool> {
    let Some(v1) = store.load_snapshot(v1_name)? else {
        debug!(document = v1_name, "no V1 settings document, no migration needed");
        return Ok(false);
    };
    if v1.is_empty() {
        warn!(document = v1_name, "V1 settings document found but empty");
        return Ok(false);
    }

    info!(from = v1_name, to = v2_name, "migrating settings document");
    store.save_snapshot(v2_name, &v1)?;

    if let Err(err) = store.remove_snapshot(v1_name) {
        warn!(document = v1_name, "failed to remove old settings document: {err}");
    }
    Ok(true)
}
