//! Setting definitions and the value model.
//!
//! A [`SettingDefinition`] is the declarative description of one configurable
//! item: key, kind, current value, kind-specific metadata, and optional
//! behavior overrides. Values are `serde_json::Value` so the model
//! round-trips through snapshot persistence unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

use crate::widget::{ChangeListener, SurfaceControl};

/// Flat key-to-value mapping of all non-button definitions. The unit of
/// persistence and of external consumption.
pub type Snapshot = serde_json::Map<String, Value>;

/// Reads the current value out of a bound control.
pub type ReadFn = Box<dyn Fn(&dyn SurfaceControl) -> Option<Value>>;

/// Writes a model value into a bound control.
pub type WriteFn = Box<dyn Fn(&mut dyn SurfaceControl, &Value)>;

/// Constructs a control from the current model value.
pub type CreateFn = Box<dyn Fn(&Value) -> Box<dyn SurfaceControl>>;

/// Invoked when a button definition's control is clicked.
pub type InvokeCallback = Rc<dyn Fn()>;

/// Invoked once per confirm with the persisted snapshot.
pub type SnapshotCallback = Box<dyn Fn(&Snapshot)>;

/// The closed set of setting kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingKind {
    /// Boolean switch.
    Toggle,
    /// Selection from an ordered option list; value is the option key.
    Choice,
    /// Numeric slider.
    Range,
    /// Single-line text.
    TextLine,
    /// Multi-line text.
    TextBlock,
    /// Integer entered as text.
    Integer,
    /// Action button; carries no value and never appears in a snapshot.
    Button,
    /// Non-interactive, display-only row.
    Hint,
    /// Fully caller-supplied widget behavior.
    Custom,
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toggle => write!(f, "toggle"),
            Self::Choice => write!(f, "choice"),
            Self::Range => write!(f, "range"),
            Self::TextLine => write!(f, "textline"),
            Self::TextBlock => write!(f, "textblock"),
            Self::Integer => write!(f, "integer"),
            Self::Button => write!(f, "button"),
            Self::Hint => write!(f, "hint"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// Slider bounds and step for [`SettingKind::Range`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeBounds {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Step between positions.
    pub step: f64,
}

impl RangeBounds {
    /// Create bounds from min, max, and step.
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }
}

impl Default for RangeBounds {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
        }
    }
}

/// One entry of a choice definition's ordered option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Stored value key.
    pub value: String,
    /// Label shown to the user.
    pub label: String,
}

impl ChoiceOption {
    /// Create an option from value key and display label.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Layout orientation of a panel row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowDirection {
    /// Control beside the title.
    #[default]
    Row,
    /// Control below the title, full width.
    Column,
}

/// Declarative description of one configurable item.
///
/// Built with the kind-specific constructors plus `with_*` builder methods:
///
/// ```rust,ignore
/// SettingDefinition::toggle("autoRefresh", true)
///     .with_title("Auto refresh")
///     .with_description("Reload the list periodically");
/// ```
pub struct SettingDefinition {
    /// Unique key within a registry instance.
    pub key: String,
    /// The kind, fixing default widget behavior.
    pub kind: SettingKind,
    /// Current in-memory value.
    pub value: Value,
    /// Panel row title.
    pub title: String,
    /// Optional panel row description.
    pub description: Option<String>,
    /// Panel row orientation.
    pub direction: RowDirection,
    /// Ordered options, for choice definitions.
    pub options: Vec<ChoiceOption>,
    /// Slider bounds, for range definitions. Defaults to 0..=100 step 1.
    pub bounds: Option<RangeBounds>,
    /// Button label, for button definitions.
    pub button_label: Option<String>,
    /// Click callback, for button definitions.
    pub on_invoke: Option<InvokeCallback>,
    /// Fires after a widget-driven change; never on registry-driven writes.
    pub on_change: Option<ChangeListener>,
    /// Construction override. Required for custom definitions.
    pub create_widget: Option<CreateFn>,
    /// Read override. Required for custom definitions.
    pub read_from_widget: Option<ReadFn>,
    /// Write override. Required for custom definitions.
    pub write_to_widget: Option<WriteFn>,
}

impl SettingDefinition {
    /// Create a definition of the given kind and initial value. The title
    /// defaults to the key until overridden.
    pub fn new(key: impl Into<String>, kind: SettingKind, value: impl Into<Value>) -> Self {
        let key = key.into();
        Self {
            title: key.clone(),
            key,
            kind,
            value: value.into(),
            description: None,
            direction: RowDirection::default(),
            options: Vec::new(),
            bounds: None,
            button_label: None,
            on_invoke: None,
            on_change: None,
            create_widget: None,
            read_from_widget: None,
            write_to_widget: None,
        }
    }

    /// A boolean toggle.
    pub fn toggle(key: impl Into<String>, initial: bool) -> Self {
        Self::new(key, SettingKind::Toggle, initial)
    }

    /// A choice over the given ordered options.
    pub fn choice(
        key: impl Into<String>,
        initial: impl Into<String>,
        options: Vec<ChoiceOption>,
    ) -> Self {
        let mut def = Self::new(key, SettingKind::Choice, initial.into());
        def.options = options;
        def
    }

    /// A numeric slider over the given bounds.
    pub fn range(key: impl Into<String>, initial: f64, bounds: RangeBounds) -> Self {
        let mut def = Self::new(key, SettingKind::Range, initial);
        def.bounds = Some(bounds);
        def
    }

    /// A single-line text input.
    pub fn text_line(key: impl Into<String>, initial: impl Into<String>) -> Self {
        Self::new(key, SettingKind::TextLine, initial.into())
    }

    /// A multi-line text input.
    pub fn text_block(key: impl Into<String>, initial: impl Into<String>) -> Self {
        Self::new(key, SettingKind::TextBlock, initial.into())
    }

    /// An integer entered as text.
    pub fn integer(key: impl Into<String>, initial: i64) -> Self {
        Self::new(key, SettingKind::Integer, initial)
    }

    /// An action button. Carries no value.
    pub fn button(
        key: impl Into<String>,
        label: impl Into<String>,
        on_invoke: impl Fn() + 'static,
    ) -> Self {
        let mut def = Self::new(key, SettingKind::Button, Value::Null);
        def.button_label = Some(label.into());
        def.on_invoke = Some(Rc::new(on_invoke));
        def
    }

    /// A display-only hint row.
    pub fn hint(key: impl Into<String>) -> Self {
        Self::new(key, SettingKind::Hint, Value::Null)
    }

    /// A fully caller-supplied definition. Must also receive all three
    /// widget overrides to be functional.
    pub fn custom(key: impl Into<String>, initial: impl Into<Value>) -> Self {
        Self::new(key, SettingKind::Custom, initial)
    }

    /// Set the panel row title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the panel row description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the panel row orientation.
    pub fn with_direction(mut self, direction: RowDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Attach a callback fired after widget-driven changes.
    pub fn with_on_change(mut self, on_change: impl Fn(&Value) + 'static) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }

    /// Override widget construction.
    pub fn with_create_widget(
        mut self,
        create: impl Fn(&Value) -> Box<dyn SurfaceControl> + 'static,
    ) -> Self {
        self.create_widget = Some(Box::new(create));
        self
    }

    /// Override the widget read accessor.
    pub fn with_read_from_widget(
        mut self,
        read: impl Fn(&dyn SurfaceControl) -> Option<Value> + 'static,
    ) -> Self {
        self.read_from_widget = Some(Box::new(read));
        self
    }

    /// Override the widget write accessor.
    pub fn with_write_to_widget(
        mut self,
        write: impl Fn(&mut dyn SurfaceControl, &Value) + 'static,
    ) -> Self {
        self.write_to_widget = Some(Box::new(write));
        self
    }

    /// Whether all three overrides a custom definition requires are present.
    pub fn has_complete_overrides(&self) -> bool {
        self.create_widget.is_some()
            && self.read_from_widget.is_some()
            && self.write_to_widget.is_some()
    }
}

impl fmt::Debug for SettingDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingDefinition")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("value", &self.value)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}
