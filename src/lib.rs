//! # PrefKit
//!
//! A settings registry with widget binding and an explicit commit lifecycle.
//! PrefKit binds a declarative set of typed setting definitions to controls
//! on a rendering surface, keeps an in-memory value model synchronized with
//! those controls, and persists the model as a named JSON snapshot under a
//! confirm/revert protocol.
//!
//! ## Architecture
//!
//! PrefKit is organized as a workspace with multiple crates:
//!
//! 1. **prefkit-core** - Shared type aliases and the log ring buffer
//! 2. **prefkit-registry** - Definitions, widget bindings, registry, stores
//! 3. **prefkit-surface** - Headless reference backend for the widget contract
//! 4. **prefkit-workspace** - Catalog lookup, folder/filter state, migration
//! 5. **prefkit** - This facade, re-exporting the public surface
//!
//! ## Example
//!
//! ```rust
//! use prefkit::{MemoryStore, SettingDefinition, SettingsRegistry, Value};
//!
//! let mut registry = SettingsRegistry::new(Box::new(MemoryStore::new()));
//! registry
//!     .add_item(SettingDefinition::toggle("autoRefresh", true).with_title("Auto refresh"))
//!     .unwrap();
//! assert_eq!(registry.dump().get("autoRefresh"), Some(&Value::Bool(true)));
//! ```

pub use prefkit_core::{
    shared, shared_none, thread_safe, BufferLayer, Callback, DataCallback, LogBuffer, LogEntry,
    Shared, SharedHashMap, SharedOption, SharedVec, ThreadSafe, ThreadSafeOption, ThreadSafeVec,
    UiCallback,
};

pub use prefkit_registry::{
    ChangeListener, ChoiceOption, ControlBlueprint, ControlFactory, CustomPolicy, JsonFileStore,
    MemoryStore, PanelEntry, RangeBounds, RowDirection, SettingDefinition, SettingKind,
    SettingsError, SettingsRegistry, SettingsResult, Snapshot, SnapshotStore, StoreError,
    StoreResult, SurfaceControl, Value,
};

pub use prefkit_surface::{ControlProbe, HeadlessControl, HeadlessFactory, SettingsPanel};

pub use prefkit_workspace::{
    decode_icon, migrate_settings, DirectoryApi, FilterRange, FilterState, FilterStateStore,
    FolderStateStore, IconRender, NotebookInfo, StatusFilter, WorkspaceCatalog, WorkspaceError,
    WorkspaceResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with console output, RUST_LOG environment
/// variable support, and UTC timestamps.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}

/// Initialize logging with an additional in-memory ring buffer capturing
/// the most recent entries for in-application display. Returns the shared
/// buffer handle.
pub fn init_logging_with_buffer(capacity: usize) -> anyhow::Result<ThreadSafe<LogBuffer>> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .pretty();

    let buffer_layer = BufferLayer::new(capacity);
    let buffer = buffer_layer.buffer();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(buffer_layer)
        .init();

    Ok(buffer)
}
