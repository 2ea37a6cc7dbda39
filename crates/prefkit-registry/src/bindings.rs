//! Built-in widget bindings.
//!
//! Fixes the default read/write/construct behavior for each standard setting
//! kind. Every function here is an exhaustive match over [`SettingKind`];
//! custom definitions never reach these defaults, their behavior is fully
//! delegated to the caller-supplied overrides.

use serde_json::Value;

use crate::model::{SettingDefinition, SettingKind};
use crate::widget::{ControlBlueprint, SurfaceControl};

/// Default read accessor per kind.
///
/// Button and hint controls carry no value. Integer controls hold display
/// text; reading parses it, and unparseable text reads as absent.
pub fn default_read(kind: SettingKind, control: &dyn SurfaceControl) -> Option<Value> {
    match kind {
        SettingKind::Toggle
        | SettingKind::Choice
        | SettingKind::Range
        | SettingKind::TextLine
        | SettingKind::TextBlock => Some(control.value()),
        SettingKind::Integer => match control.value() {
            Value::String(text) => text.trim().parse::<i64>().ok().map(Value::from),
            number @ Value::Number(_) => Some(number),
            _ => None,
        },
        SettingKind::Button | SettingKind::Hint | SettingKind::Custom => None,
    }
}

/// Default write accessor per kind.
///
/// Integer controls receive display text; numbers are rendered before the
/// write. Button and hint controls ignore writes.
pub fn default_write(kind: SettingKind, control: &mut dyn SurfaceControl, value: &Value) {
    match kind {
        SettingKind::Toggle
        | SettingKind::Choice
        | SettingKind::Range
        | SettingKind::TextLine
        | SettingKind::TextBlock => control.set_value(value),
        SettingKind::Integer => match value {
            Value::Number(n) => control.set_value(&Value::String(n.to_string())),
            other => control.set_value(other),
        },
        SettingKind::Button | SettingKind::Hint | SettingKind::Custom => {}
    }
}

/// Construction data for a built-in definition, carrying its current model
/// value as the initial display state. Custom definitions have no blueprint.
pub fn blueprint_for(definition: &SettingDefinition) -> Option<ControlBlueprint> {
    let value = &definition.value;
    let blueprint = match definition.kind {
        SettingKind::Toggle => ControlBlueprint::Toggle {
            initial: value.as_bool().unwrap_or(false),
        },
        SettingKind::Choice => ControlBlueprint::Choice {
            options: definition.options.clone(),
            initial: value.as_str().unwrap_or_default().to_string(),
        },
        SettingKind::Range => ControlBlueprint::Range {
            bounds: definition.bounds.unwrap_or_default(),
            initial: value.as_f64().unwrap_or(0.0),
        },
        SettingKind::TextLine => ControlBlueprint::TextLine {
            initial: display_text(value),
            suppress_confirm_key: true,
        },
        SettingKind::TextBlock => ControlBlueprint::TextBlock {
            initial: display_text(value),
            suppress_confirm_key: true,
        },
        SettingKind::Integer => ControlBlueprint::Integer {
            initial: display_text(value),
            suppress_confirm_key: true,
        },
        SettingKind::Button => ControlBlueprint::Button {
            label: definition
                .button_label
                .clone()
                .unwrap_or_else(|| "Button".to_string()),
        },
        SettingKind::Hint => ControlBlueprint::Hint,
        SettingKind::Custom => return None,
    };
    Some(blueprint)
}

fn display_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChoiceOption, RangeBounds};
    use crate::widget::ChangeListener;
    use serde_json::json;
    use std::any::Any;

    struct FakeControl {
        value: Value,
    }

    impl SurfaceControl for FakeControl {
        fn value(&self) -> Value {
            self.value.clone()
        }
        fn set_value(&mut self, value: &Value) {
            self.value = value.clone();
        }
        fn set_enabled(&mut self, _enabled: bool) {}
        fn set_change_listener(&mut self, _listener: Option<ChangeListener>) {}
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_integer_read_parses_text() {
        let control = FakeControl {
            value: json!("  42 "),
        };
        assert_eq!(
            default_read(SettingKind::Integer, &control),
            Some(json!(42))
        );

        let control = FakeControl {
            value: json!("not a number"),
        };
        assert_eq!(default_read(SettingKind::Integer, &control), None);
    }

    #[test]
    fn test_integer_write_renders_text() {
        let mut control = FakeControl { value: json!("") };
        default_write(SettingKind::Integer, &mut control, &json!(7));
        assert_eq!(control.value, json!("7"));
    }

    #[test]
    fn test_button_and_hint_are_valueless() {
        let mut control = FakeControl { value: json!(true) };
        assert_eq!(default_read(SettingKind::Button, &control), None);
        assert_eq!(default_read(SettingKind::Hint, &control), None);

        default_write(SettingKind::Button, &mut control, &json!(false));
        assert_eq!(control.value, json!(true));
    }

    #[test]
    fn test_range_blueprint_defaults_bounds() {
        let def = SettingDefinition::new("volume", SettingKind::Range, 30.0);
        match blueprint_for(&def) {
            Some(ControlBlueprint::Range { bounds, initial }) => {
                assert_eq!(bounds, RangeBounds::default());
                assert_eq!(initial, 30.0);
            }
            other => panic!("unexpected blueprint: {:?}", other),
        }
    }

    #[test]
    fn test_choice_blueprint_keeps_option_order() {
        let def = SettingDefinition::choice(
            "sortBy",
            "created",
            vec![
                ChoiceOption::new("created", "Creation date"),
                ChoiceOption::new("priority", "Priority"),
            ],
        );
        match blueprint_for(&def) {
            Some(ControlBlueprint::Choice { options, initial }) => {
                assert_eq!(initial, "created");
                assert_eq!(options[0].value, "created");
                assert_eq!(options[1].value, "priority");
            }
            other => panic!("unexpected blueprint: {:?}", other),
        }
    }

    #[test]
    fn test_custom_has_no_blueprint() {
        let def = SettingDefinition::custom("raw", json!({"a": 1}));
        assert!(blueprint_for(&def).is_none());
    }
}
