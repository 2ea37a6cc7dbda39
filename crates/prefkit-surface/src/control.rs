//! Headless controls.
//!
//! A full implementation of the widget contract with no rendering behind it.
//! Each control keeps its display state in a shared cell so a test (or an
//! embedder's inspection tooling) can hold a [`ControlProbe`] onto it and
//! keep observing the display after the registry has released the handle.
//!
//! Toolkit backends are expected to mirror this file: one control per
//! blueprint variant, user interaction routed through the change listener,
//! programmatic writes bypassing it.

use prefkit_core::{shared, Shared};
use prefkit_registry::{
    ChangeListener, ChoiceOption, ControlBlueprint, ControlFactory, RangeBounds, SurfaceControl,
    Value,
};
use std::any::Any;

/// Kind-specific display behavior of a headless control.
#[derive(Debug, Clone, PartialEq)]
enum Behavior {
    Toggle,
    Choice { options: Vec<ChoiceOption> },
    Range { bounds: RangeBounds },
    Text { suppress_confirm_key: bool },
    Button { label: String },
    Hint,
}

/// Display state shared between a control handle and its probes.
struct ControlState {
    behavior: Behavior,
    value: Value,
    enabled: bool,
    /// Mirrors the slider position, updated on user edits only.
    live_label: Option<String>,
    clicks: u32,
    listener: Option<ChangeListener>,
}

impl ControlState {
    /// Apply display rules: choices ignore unknown option keys, ranges
    /// clamp to their bounds.
    fn apply(&mut self, value: &Value) {
        match &self.behavior {
            Behavior::Choice { options } => {
                let known = value
                    .as_str()
                    .is_some_and(|key| options.iter().any(|o| o.value == key));
                if known {
                    self.value = value.clone();
                }
            }
            Behavior::Range { bounds } => {
                if let Some(position) = value.as_f64() {
                    let clamped = position.clamp(bounds.min, bounds.max);
                    self.value = Value::from(clamped);
                }
            }
            Behavior::Button { .. } | Behavior::Hint => {}
            Behavior::Toggle | Behavior::Text { .. } => {
                self.value = value.clone();
            }
        }
    }
}

/// Read-only view onto a control's display state. Clones observe the same
/// state, including after the owning handle has been dropped.
#[derive(Clone)]
pub struct ControlProbe {
    state: Shared<ControlState>,
}

impl ControlProbe {
    /// Current displayed value.
    pub fn value(&self) -> Value {
        self.state.borrow().value.clone()
    }

    /// Whether the control accepts interaction.
    pub fn is_enabled(&self) -> bool {
        self.state.borrow().enabled
    }

    /// The live label beside a slider, if it has been updated.
    pub fn live_label(&self) -> Option<String> {
        self.state.borrow().live_label.clone()
    }

    /// Number of times a button control was clicked.
    pub fn clicks(&self) -> u32 {
        self.state.borrow().clicks
    }

    /// Button label, for button controls.
    pub fn label(&self) -> Option<String> {
        match &self.state.borrow().behavior {
            Behavior::Button { label } => Some(label.clone()),
            _ => None,
        }
    }

    /// Whether a change listener is currently attached.
    pub fn has_listener(&self) -> bool {
        self.state.borrow().listener.is_some()
    }
}

/// A headless control implementing the full widget contract.
pub struct HeadlessControl {
    state: Shared<ControlState>,
}

impl HeadlessControl {
    /// Build a control for the given blueprint.
    pub fn from_blueprint(blueprint: &ControlBlueprint) -> Self {
        let (behavior, value) = match blueprint {
            ControlBlueprint::Toggle { initial } => (Behavior::Toggle, Value::from(*initial)),
            ControlBlueprint::Choice { options, initial } => (
                Behavior::Choice {
                    options: options.clone(),
                },
                Value::from(initial.clone()),
            ),
            ControlBlueprint::Range { bounds, initial } => (
                Behavior::Range { bounds: *bounds },
                Value::from(initial.clamp(bounds.min, bounds.max)),
            ),
            ControlBlueprint::TextLine {
                initial,
                suppress_confirm_key,
            }
            | ControlBlueprint::TextBlock {
                initial,
                suppress_confirm_key,
            }
            | ControlBlueprint::Integer {
                initial,
                suppress_confirm_key,
            } => (
                Behavior::Text {
                    suppress_confirm_key: *suppress_confirm_key,
                },
                Value::from(initial.clone()),
            ),
            ControlBlueprint::Button { label } => (
                Behavior::Button {
                    label: label.clone(),
                },
                Value::Null,
            ),
            ControlBlueprint::Hint => (Behavior::Hint, Value::Null),
        };
        Self {
            state: shared(ControlState {
                behavior,
                value,
                enabled: true,
                live_label: None,
                clicks: 0,
                listener: None,
            }),
        }
    }

    /// A probe observing this control's display state.
    pub fn probe(&self) -> ControlProbe {
        ControlProbe {
            state: self.state.clone(),
        }
    }

    /// Simulate a user edit: apply the value to the display, update the
    /// live label for sliders, and fire the change listener.
    pub fn edit(&mut self, value: Value) {
        let listener = {
            let mut state = self.state.borrow_mut();
            if !state.enabled {
                return;
            }
            state.apply(&value);
            if matches!(state.behavior, Behavior::Range { .. }) {
                state.live_label = Some(display_text(&state.value));
            }
            state.listener.clone()
        };
        let applied = self.state.borrow().value.clone();
        if let Some(listener) = listener {
            listener(&applied);
        }
    }

    /// Simulate a click on a button control, firing the change listener.
    pub fn click(&mut self) {
        let listener = {
            let mut state = self.state.borrow_mut();
            if !state.enabled || !matches!(state.behavior, Behavior::Button { .. }) {
                return;
            }
            state.clicks += 1;
            state.listener.clone()
        };
        if let Some(listener) = listener {
            listener(&Value::Null);
        }
    }

    /// Simulate a confirmation-key press inside the control. Returns `true`
    /// when the control swallows the press, in which case the hosting panel
    /// must not treat it as a confirm.
    pub fn press_confirm_key(&self) -> bool {
        matches!(
            self.state.borrow().behavior,
            Behavior::Text {
                suppress_confirm_key: true
            }
        )
    }
}

impl SurfaceControl for HeadlessControl {
    fn value(&self) -> Value {
        self.state.borrow().value.clone()
    }

    fn set_value(&mut self, value: &Value) {
        // programmatic write: no listener, no live-label update
        self.state.borrow_mut().apply(value);
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.state.borrow_mut().enabled = enabled;
    }

    fn set_change_listener(&mut self, listener: Option<ChangeListener>) {
        self.state.borrow_mut().listener = listener;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Drop for HeadlessControl {
    fn drop(&mut self) {
        // handle disposal releases the attached listener
        self.state.borrow_mut().listener = None;
    }
}

/// Factory building headless controls from blueprints.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessFactory;

impl ControlFactory for HeadlessFactory {
    fn build(&self, blueprint: &ControlBlueprint) -> Box<dyn SurfaceControl> {
        Box::new(HeadlessControl::from_blueprint(blueprint))
    }
}

fn display_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
