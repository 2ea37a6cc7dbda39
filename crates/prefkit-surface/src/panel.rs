//! Headless settings panel host.
//!
//! Drives the registry through the host lifecycle the way a real toolkit
//! backend would: open materializes every panel entry, confirm and cancel
//! are the two ways a panel closes, and confirmation-key presses are routed
//! through the focused control so text inputs can swallow them.

use prefkit_registry::{SettingsRegistry, SettingsResult, Snapshot};
use tracing::debug;

use crate::control::{HeadlessControl, HeadlessFactory};

/// A headless host panel over one registry.
#[derive(Debug, Default)]
pub struct SettingsPanel {
    open: bool,
}

impl SettingsPanel {
    /// Create a closed panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the panel is currently open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the panel: materialize a widget for every panel entry.
    pub fn open(&mut self, registry: &mut SettingsRegistry) {
        debug!(entries = registry.panel_entries().len(), "opening settings panel");
        registry.materialize_all(&HeadlessFactory);
        self.open = true;
    }

    /// Accept the panel, committing widget state through the registry.
    pub fn confirm(&mut self, registry: &mut SettingsRegistry) -> SettingsResult<Snapshot> {
        let snapshot = registry.confirm()?;
        self.open = false;
        Ok(snapshot)
    }

    /// Close the panel without confirming, reverting widget display.
    pub fn cancel(&mut self, registry: &mut SettingsRegistry) {
        registry.destroy();
        self.open = false;
    }

    /// Route a confirmation-key press. When `focused` names a control that
    /// swallows the press (text inputs while editing), nothing happens;
    /// otherwise the press confirms the panel.
    pub fn press_confirm_key(
        &mut self,
        registry: &mut SettingsRegistry,
        focused: Option<&str>,
    ) -> SettingsResult<Option<Snapshot>> {
        if let Some(key) = focused {
            let suppressed = registry
                .widget(key)
                .and_then(|w| w.as_any().downcast_ref::<HeadlessControl>())
                .is_some_and(|control| control.press_confirm_key());
            if suppressed {
                debug!(key, "confirmation key swallowed by focused control");
                return Ok(None);
            }
        }
        self.confirm(registry).map(Some)
    }
}
