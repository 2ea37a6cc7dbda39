//! # PrefKit Workspace
//!
//! The workspace-side collaborators around the settings registry: cached
//! notebook/document catalog lookup, persisted folder-expansion and filter
//! state, and the one-time storage-format migration. All persistence goes
//! through the registry crate's snapshot store boundary.

pub mod catalog;
pub mod error;
pub mod filters;
pub mod folders;
pub mod migration;

pub use catalog::{
    decode_icon, DirectoryApi, IconRender, NotebookInfo, WorkspaceCatalog, DEFAULT_DOCUMENT_ICON,
    DEFAULT_NOTEBOOK_ICON,
};
pub use error::{WorkspaceError, WorkspaceResult};
pub use filters::{
    FilterRange, FilterState, FilterStateStore, StatusFilter, FILTER_STATE_DOCUMENT,
};
pub use folders::{FolderStateStore, FOLDED_DIRS_DOCUMENT};
pub use migration::{migrate_settings, SETTINGS_DOCUMENT_V1, SETTINGS_DOCUMENT_V2};
