//! # PrefKit Registry
//!
//! The settings registry and its widget-binding machinery: declarative
//! setting definitions, default widget behavior per kind, lazy widget
//! materialization against a rendering surface, an explicit confirm/revert
//! panel lifecycle, and JSON snapshot persistence behind a store trait.

pub mod bindings;
pub mod error;
pub mod model;
pub mod registry;
pub mod store;
pub mod widget;

pub use error::{SettingsError, SettingsResult, StoreError, StoreResult};
pub use model::{
    ChoiceOption, CreateFn, InvokeCallback, RangeBounds, ReadFn, RowDirection, SettingDefinition,
    SettingKind, Snapshot, SnapshotCallback, WriteFn,
};
pub use registry::{CustomPolicy, SettingsRegistry};
pub use store::{JsonFileStore, MemoryStore, SnapshotStore};
pub use widget::{ChangeListener, ControlBlueprint, ControlFactory, PanelEntry, SurfaceControl};

// The value model is serde_json's
pub use serde_json::Value;
