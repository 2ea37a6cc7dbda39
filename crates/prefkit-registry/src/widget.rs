//! The widget contract.
//!
//! A rendering surface exposes its controls to the registry through
//! [`SurfaceControl`]: read a value, write a value, toggle interactivity,
//! and accept a change listener for user-driven edits. Disposal is `Drop`;
//! a control must release any attached listeners when its handle is dropped.
//!
//! Construction is a two-phase protocol. Registration is pure data; the
//! registry later hands a [`ControlBlueprint`] to the host's
//! [`ControlFactory`] when the panel is actually rendered, so a widget only
//! exists while its hosting panel is open.

use serde_json::Value;
use std::any::Any;
use std::rc::Rc;

use crate::model::{ChoiceOption, RangeBounds, RowDirection};

/// Listener invoked with the new value after a user-driven change.
pub type ChangeListener = Rc<dyn Fn(&Value)>;

/// A live control on the rendering surface, bound 1:1 to a definition.
///
/// Handles are exclusively owned by their registry entry for their bound
/// lifetime and are never aliased externally.
pub trait SurfaceControl: Any {
    /// Current value as displayed by the control.
    fn value(&self) -> Value;

    /// Push a value into the control's display. Must not fire the change
    /// listener; that is reserved for user interaction.
    fn set_value(&mut self, value: &Value);

    /// Toggle whether the control accepts user interaction.
    fn set_enabled(&mut self, enabled: bool);

    /// Attach or clear the listener fired on user-driven changes.
    fn set_change_listener(&mut self, listener: Option<ChangeListener>);

    /// Downcast support for backend-specific access.
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support for backend-specific access.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Construction data for one built-in control, one variant per kind.
///
/// Carries the current model value as the initial display state, so a
/// factory returns handles that already show the right value.
#[derive(Debug, Clone)]
pub enum ControlBlueprint {
    /// Boolean switch.
    Toggle {
        /// Initial on/off state.
        initial: bool,
    },
    /// Dropdown over an ordered option list.
    Choice {
        /// Options in display order.
        options: Vec<ChoiceOption>,
        /// Initially selected option key.
        initial: String,
    },
    /// Numeric slider with a live label mirroring the current value.
    Range {
        /// Slider bounds and step.
        bounds: RangeBounds,
        /// Initial position.
        initial: f64,
    },
    /// Single-line text input.
    TextLine {
        /// Initial text.
        initial: String,
        /// Swallow confirmation-key presses so editing does not confirm
        /// the hosting panel.
        suppress_confirm_key: bool,
    },
    /// Multi-line text input.
    TextBlock {
        /// Initial text.
        initial: String,
        /// Swallow confirmation-key presses while editing.
        suppress_confirm_key: bool,
    },
    /// Text input holding an integer's display text.
    Integer {
        /// Initial display text.
        initial: String,
        /// Swallow confirmation-key presses while editing.
        suppress_confirm_key: bool,
    },
    /// Clickable action button.
    Button {
        /// Button label.
        label: String,
    },
    /// Non-interactive, display-only row.
    Hint,
}

/// Per-toolkit factory turning blueprints into live controls.
pub trait ControlFactory {
    /// Build a control for the given blueprint.
    fn build(&self, blueprint: &ControlBlueprint) -> Box<dyn SurfaceControl>;
}

/// A deferred panel-entry request: the titled row the host renders for one
/// definition, materialized only when the panel opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelEntry {
    /// Definition key this entry belongs to.
    pub key: String,
    /// Row title.
    pub title: String,
    /// Optional longer description under the title.
    pub description: Option<String>,
    /// Row layout orientation.
    pub direction: RowDirection,
}
