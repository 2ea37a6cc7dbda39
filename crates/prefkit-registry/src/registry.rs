//! The settings registry.
//!
//! Owns the set of definitions, the live value model, and the live widget
//! handles. Registration is pure data; widgets are materialized lazily when
//! the host renders the panel, and released when it closes. `confirm` and
//! `destroy` are the two terminal lifecycle events of an open panel:
//! accept-and-commit versus close-and-revert.
//!
//! All mutation goes through `&mut self`, so persisting operations on one
//! registry are serialized structurally; there is no way for a later save to
//! be overtaken by an earlier one.

use serde_json::Value;
use std::rc::Rc;
use tracing::{debug, error};

use crate::bindings;
use crate::error::{SettingsError, SettingsResult};
use crate::model::{SettingDefinition, SettingKind, Snapshot, SnapshotCallback};
use crate::store::SnapshotStore;
use crate::widget::{ControlFactory, PanelEntry, SurfaceControl};

/// What to do with a custom definition missing required overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CustomPolicy {
    /// Register the item but leave it inert for widget I/O: reads return
    /// absent, writes are ignored. A validation error is logged.
    #[default]
    DegradeInert,
    /// Reject the registration outright.
    Reject,
}

/// One registered definition plus its bound-lifetime state.
struct RegistryEntry {
    definition: SettingDefinition,
    /// Value at registration time, prior to any load.
    default_value: Value,
    /// Live handle, present only while the hosting panel is open.
    widget: Option<Box<dyn SurfaceControl>>,
    /// Custom definition missing required overrides; no widget I/O.
    inert: bool,
}

/// Registry of setting definitions with widget binding and an explicit
/// confirm/revert lifecycle.
pub struct SettingsRegistry {
    name: String,
    file: String,
    store: Box<dyn SnapshotStore>,
    custom_policy: CustomPolicy,
    confirm_callback: Option<SnapshotCallback>,
    entries: Vec<RegistryEntry>,
}

impl SettingsRegistry {
    /// Create a registry persisting under the default name `"settings"`.
    pub fn new(store: Box<dyn SnapshotStore>) -> Self {
        Self {
            name: "settings".to_string(),
            file: "settings.json".to_string(),
            store,
            custom_policy: CustomPolicy::default(),
            confirm_callback: None,
            entries: Vec::new(),
        }
    }

    /// Persist under `name` instead. A `.json` suffix is appended to the
    /// document name when not already present.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self.file = if self.name.ends_with(".json") {
            self.name.clone()
        } else {
            format!("{}.json", self.name)
        };
        self
    }

    /// Set the policy for custom definitions missing required overrides.
    pub fn with_custom_policy(mut self, policy: CustomPolicy) -> Self {
        self.custom_policy = policy;
        self
    }

    /// Attach a callback invoked once per confirm with the persisted
    /// snapshot.
    pub fn with_confirm_callback(mut self, callback: impl Fn(&Snapshot) + 'static) -> Self {
        self.confirm_callback = Some(Box::new(callback));
        self
    }

    /// Configured registry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Document name snapshots are persisted under.
    pub fn document_name(&self) -> &str {
        &self.file
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no definitions are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a definition is registered under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entry(key).is_some()
    }

    /// Register a definition. Re-adding a key overwrites its definition,
    /// keeping the original panel position; any bound widget of the old
    /// definition is dropped.
    ///
    /// Custom definitions must supply all three widget overrides; what
    /// happens when they do not is governed by [`CustomPolicy`].
    pub fn add_item(&mut self, definition: SettingDefinition) -> SettingsResult<()> {
        let inert = definition.kind == SettingKind::Custom && !definition.has_complete_overrides();
        if inert {
            match self.custom_policy {
                CustomPolicy::Reject => {
                    return Err(SettingsError::InvalidSetting {
                        key: definition.key.clone(),
                        reason: "custom items must supply create_widget, read_from_widget and \
                                 write_to_widget"
                            .to_string(),
                    });
                }
                CustomPolicy::DegradeInert => {
                    error!(
                        key = %definition.key,
                        "custom setting item is missing create_widget, read_from_widget or \
                         write_to_widget; registered but inert"
                    );
                }
            }
        }

        let entry = RegistryEntry {
            default_value: definition.value.clone(),
            definition,
            widget: None,
            inert,
        };
        match self
            .entries
            .iter()
            .position(|e| e.definition.key == entry.definition.key)
        {
            Some(index) => self.entries[index] = entry,
            None => self.entries.push(entry),
        }
        Ok(())
    }

    /// The in-memory value for `key`. No widget or storage I/O.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entry(key).map(|e| e.definition.value.clone())
    }

    /// The value `key` was registered with, prior to any load.
    pub fn default_value(&self, key: &str) -> Option<Value> {
        self.entry(key).map(|e| e.default_value.clone())
    }

    /// Write `value` into the model and, if a widget is bound, push it into
    /// the widget. Does not persist. Unknown keys are a silent no-op.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let Some(entry) = self.entry_mut(key) else {
            return;
        };
        entry.definition.value = value.into();
        Self::push_to_widget(entry);
    }

    /// [`set`](Self::set) followed by a full snapshot persist.
    pub fn set_and_save(&mut self, key: &str, value: impl Into<Value>) -> SettingsResult<()> {
        if !self.contains_key(key) {
            return Ok(());
        }
        self.set(key, value);
        self.save()
    }

    /// Read the current value directly out of the bound widget, bypassing
    /// the model. With `apply`, the read value is also written into the
    /// model. Returns `None` when no widget is bound or the widget's value
    /// does not read back (inert custom items, valueless kinds, unparseable
    /// integer text). Does not persist.
    pub fn take(&mut self, key: &str, apply: bool) -> Option<Value> {
        let entry = self.entry_mut(key)?;
        if entry.inert {
            return None;
        }
        let widget = entry.widget.as_deref()?;
        let value = match &entry.definition.read_from_widget {
            Some(read) => read(widget),
            None => bindings::default_read(entry.definition.kind, widget),
        }?;
        if apply {
            entry.definition.value = value.clone();
        }
        Some(value)
    }

    /// `take(key, true)` followed by a full snapshot persist. Returns the
    /// value read from the widget.
    pub fn take_and_save(&mut self, key: &str) -> SettingsResult<Option<Value>> {
        let value = self.take(key, true);
        self.save()?;
        Ok(value)
    }

    /// The current snapshot: every definition's value except buttons.
    pub fn dump(&self) -> Snapshot {
        let mut snapshot = Snapshot::new();
        for entry in &self.entries {
            if entry.definition.kind == SettingKind::Button {
                continue;
            }
            snapshot.insert(
                entry.definition.key.clone(),
                entry.definition.value.clone(),
            );
        }
        snapshot
    }

    /// Persist the current snapshot.
    pub fn save(&mut self) -> SettingsResult<()> {
        let snapshot = self.dump();
        self.store.save_snapshot(&self.file, &snapshot)?;
        Ok(())
    }

    /// Load the stored snapshot and overlay it onto the model: every
    /// registered key present in storage is overwritten, keys absent from
    /// storage keep their current value, and stored keys with no definition
    /// are ignored. Returns a fresh [`dump`](Self::dump) for the host's
    /// externally visible configuration state.
    pub fn load(&mut self) -> SettingsResult<Snapshot> {
        let stored = self.store.load_snapshot(&self.file)?;
        debug!(document = %self.file, found = stored.is_some(), "loaded settings snapshot");
        if let Some(stored) = stored {
            for entry in &mut self.entries {
                if let Some(value) = stored.get(&entry.definition.key) {
                    entry.definition.value = value.clone();
                }
            }
        }
        Ok(self.dump())
    }

    /// Enable the bound widget. No-op when no widget is bound.
    pub fn enable(&mut self, key: &str) {
        if let Some(widget) = self.widget_mut(key) {
            widget.set_enabled(true);
        }
    }

    /// Disable the bound widget. No-op when no widget is bound.
    pub fn disable(&mut self, key: &str) {
        if let Some(widget) = self.widget_mut(key) {
            widget.set_enabled(false);
        }
    }

    /// The titled panel entries for every definition, in registration
    /// order. Hosts render these and then call
    /// [`materialize_all`](Self::materialize_all).
    pub fn panel_entries(&self) -> Vec<PanelEntry> {
        self.entries
            .iter()
            .map(|entry| PanelEntry {
                key: entry.definition.key.clone(),
                title: entry.definition.title.clone(),
                description: entry.definition.description.clone(),
                direction: entry.definition.direction,
            })
            .collect()
    }

    /// Build widgets for every definition that has none, via the host's
    /// factory. The current model value is applied before a handle is
    /// exposed, and change notifications are wired to the definition's
    /// callbacks.
    pub fn materialize_all(&mut self, factory: &dyn ControlFactory) {
        for entry in &mut self.entries {
            Self::materialize_entry(entry, factory);
        }
    }

    /// Build the widget for one definition, if not already bound.
    pub fn materialize(&mut self, key: &str, factory: &dyn ControlFactory) {
        if let Some(entry) = self.entry_mut(key) {
            Self::materialize_entry(entry, factory);
        }
    }

    /// Drop every bound widget handle, releasing attached listeners. The
    /// definitions survive and can be re-materialized later.
    pub fn release_widgets(&mut self) {
        for entry in &mut self.entries {
            entry.widget = None;
        }
    }

    /// Whether a widget is currently bound for `key`.
    pub fn is_bound(&self, key: &str) -> bool {
        self.entry(key).is_some_and(|e| e.widget.is_some())
    }

    /// The bound widget for `key`, if any.
    pub fn widget(&self, key: &str) -> Option<&dyn SurfaceControl> {
        self.entry(key)?.widget.as_deref()
    }

    /// The bound widget for `key`, mutably, if any.
    pub fn widget_mut(&mut self, key: &str) -> Option<&mut dyn SurfaceControl> {
        self.entry_mut(key)?.widget.as_deref_mut()
    }

    /// Panel accepted: pull every widget value into the model, persist the
    /// resulting snapshot, invoke the consumer callback with it, and release
    /// the widgets. On a store failure the widgets stay bound and the model
    /// keeps the pulled values.
    pub fn confirm(&mut self) -> SettingsResult<Snapshot> {
        for entry in &mut self.entries {
            Self::pull_from_widget(entry);
        }
        let snapshot = self.dump();
        self.store.save_snapshot(&self.file, &snapshot)?;
        debug!(document = %self.file, "confirmed settings panel");
        if let Some(callback) = &self.confirm_callback {
            callback(&snapshot);
        }
        self.release_widgets();
        Ok(snapshot)
    }

    /// Panel closed without confirming: push the model's last-committed
    /// value back into every bound widget (visual revert), then release the
    /// widgets. Never mutates the model, never persists.
    pub fn destroy(&mut self) {
        for entry in &mut self.entries {
            Self::push_to_widget(entry);
        }
        self.release_widgets();
    }

    fn entry(&self, key: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| e.definition.key == key)
    }

    fn entry_mut(&mut self, key: &str) -> Option<&mut RegistryEntry> {
        self.entries.iter_mut().find(|e| e.definition.key == key)
    }

    fn materialize_entry(entry: &mut RegistryEntry, factory: &dyn ControlFactory) {
        if entry.widget.is_some() {
            return;
        }
        let definition = &entry.definition;
        let mut widget = if let Some(create) = &definition.create_widget {
            create(&definition.value)
        } else {
            match bindings::blueprint_for(definition) {
                Some(blueprint) => factory.build(&blueprint),
                // custom definition without a construction override
                None => return,
            }
        };

        match definition.kind {
            SettingKind::Button => {
                if let Some(invoke) = &definition.on_invoke {
                    let invoke = invoke.clone();
                    widget.set_change_listener(Some(Rc::new(move |_| invoke())));
                }
            }
            _ => {
                if let Some(on_change) = &definition.on_change {
                    widget.set_change_listener(Some(on_change.clone()));
                }
            }
        }
        entry.widget = Some(widget);
    }

    fn pull_from_widget(entry: &mut RegistryEntry) {
        if entry.inert {
            return;
        }
        let Some(widget) = entry.widget.as_deref() else {
            return;
        };
        let value = match &entry.definition.read_from_widget {
            Some(read) => read(widget),
            None => bindings::default_read(entry.definition.kind, widget),
        };
        if let Some(value) = value {
            entry.definition.value = value;
        }
    }

    fn push_to_widget(entry: &mut RegistryEntry) {
        if entry.inert {
            return;
        }
        let RegistryEntry {
            definition, widget, ..
        } = entry;
        let Some(widget) = widget.as_deref_mut() else {
            return;
        };
        match &definition.write_to_widget {
            Some(write) => write(widget, &definition.value),
            None => bindings::default_write(definition.kind, widget, &definition.value),
        }
    }
}
