//! End-to-end lifecycle tests driving a registry through the headless panel
//! host, the way an embedding application would.

use prefkit_core::shared;
use prefkit_registry::{
    ChoiceOption, MemoryStore, RangeBounds, SettingDefinition, SettingsRegistry, Snapshot, Value,
};
use prefkit_surface::{ControlProbe, HeadlessControl, SettingsPanel};
use serde_json::json;

fn registry() -> (SettingsRegistry, MemoryStore) {
    let store = MemoryStore::new();
    let registry = SettingsRegistry::new(Box::new(store.clone()));
    (registry, store)
}

fn control<'a>(registry: &'a mut SettingsRegistry, key: &str) -> &'a mut HeadlessControl {
    registry
        .widget_mut(key)
        .and_then(|w| w.as_any_mut().downcast_mut::<HeadlessControl>())
        .expect("headless control bound")
}

fn probe(registry: &mut SettingsRegistry, key: &str) -> ControlProbe {
    control(registry, key).probe()
}

#[test]
fn dump_after_registration_equals_defaults() {
    let (mut registry, _) = registry();
    registry
        .add_item(SettingDefinition::toggle("autoRefresh", true))
        .unwrap();

    let snapshot = registry.dump();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.get("autoRefresh"), Some(&json!(true)));
}

#[test]
fn set_updates_model_and_dump_before_any_save() {
    let (mut registry, store) = registry();
    registry
        .add_item(SettingDefinition::toggle("autoRefresh", true))
        .unwrap();

    registry.set("autoRefresh", false);
    assert_eq!(registry.get("autoRefresh"), Some(json!(false)));
    assert_eq!(registry.dump().get("autoRefresh"), Some(&json!(false)));
    assert!(!store.contains("settings.json"));
}

#[test]
fn button_never_enters_snapshot_even_after_clicks() {
    let clicks = shared(0);
    let clicks_clone = clicks.clone();

    let (mut registry, _) = registry();
    registry
        .add_item(SettingDefinition::button("resetButton", "Reset", move || {
            *clicks_clone.borrow_mut() += 1;
        }))
        .unwrap();

    let mut panel = SettingsPanel::new();
    panel.open(&mut registry);

    let button = control(&mut registry, "resetButton");
    assert_eq!(button.probe().label().as_deref(), Some("Reset"));
    button.click();
    button.click();
    assert_eq!(*clicks.borrow(), 2);

    assert!(!registry.dump().contains_key("resetButton"));
    let snapshot = panel.confirm(&mut registry).unwrap();
    assert!(!snapshot.contains_key("resetButton"));
}

#[test]
fn load_overlays_stored_keys_and_ignores_extraneous_ones() {
    let (mut registry, store) = registry();
    registry
        .add_item(SettingDefinition::toggle("autoRefresh", true))
        .unwrap();

    let mut stored = Snapshot::new();
    stored.insert("autoRefresh".to_string(), json!(false));
    stored.insert("extraneousKey".to_string(), json!(1));
    store.insert("settings.json", stored);

    registry.load().unwrap();
    assert_eq!(registry.get("autoRefresh"), Some(json!(false)));
    assert!(!registry.contains_key("extraneousKey"));
    assert_eq!(registry.get("extraneousKey"), None);
}

#[test]
fn confirm_commits_edit_that_was_never_taken() {
    let observed = shared(None::<Snapshot>);
    let observed_clone = observed.clone();

    let store = MemoryStore::new();
    let mut registry = SettingsRegistry::new(Box::new(store.clone()))
        .with_confirm_callback(move |snapshot| {
            *observed_clone.borrow_mut() = Some(snapshot.clone());
        });
    registry
        .add_item(SettingDefinition::text_line("greeting", ""))
        .unwrap();

    let mut panel = SettingsPanel::new();
    panel.open(&mut registry);
    control(&mut registry, "greeting").edit(json!("hello"));

    let snapshot = panel.confirm(&mut registry).unwrap();
    assert_eq!(snapshot.get("greeting"), Some(&json!("hello")));
    assert_eq!(store.document("settings.json").unwrap(), snapshot);
    assert_eq!(observed.borrow().as_ref(), Some(&snapshot));
    assert!(!panel.is_open());
}

#[test]
fn confirm_key_is_swallowed_inside_text_controls() {
    let (mut registry, store) = registry();
    registry
        .add_item(SettingDefinition::text_line("greeting", ""))
        .unwrap();
    registry
        .add_item(SettingDefinition::toggle("autoRefresh", true))
        .unwrap();

    let mut panel = SettingsPanel::new();
    panel.open(&mut registry);
    control(&mut registry, "greeting").edit(json!("typing..."));

    // pressing the confirmation key while editing must not confirm
    let outcome = panel
        .press_confirm_key(&mut registry, Some("greeting"))
        .unwrap();
    assert!(outcome.is_none());
    assert!(panel.is_open());
    assert!(!store.contains("settings.json"));

    // the same press with a toggle focused confirms the panel
    let outcome = panel
        .press_confirm_key(&mut registry, Some("autoRefresh"))
        .unwrap();
    let snapshot = outcome.expect("panel confirmed");
    assert_eq!(snapshot.get("greeting"), Some(&json!("typing...")));
    assert!(!panel.is_open());
}

#[test]
fn cancel_reverts_display_without_touching_model_or_store() {
    let (mut registry, store) = registry();
    registry
        .add_item(SettingDefinition::toggle("autoRefresh", true))
        .unwrap();

    let mut panel = SettingsPanel::new();
    panel.open(&mut registry);

    let display = probe(&mut registry, "autoRefresh");
    control(&mut registry, "autoRefresh").edit(json!(false));
    assert_eq!(display.value(), json!(false));

    panel.cancel(&mut registry);
    assert_eq!(display.value(), json!(true));
    assert_eq!(registry.get("autoRefresh"), Some(json!(true)));
    assert!(!store.contains("settings.json"));
    assert!(!registry.is_bound("autoRefresh"));
}

#[test]
fn reopening_rebinds_widgets_with_current_model_values() {
    let (mut registry, _) = registry();
    registry
        .add_item(SettingDefinition::choice(
            "sortBy",
            "created",
            vec![
                ChoiceOption::new("created", "Creation date"),
                ChoiceOption::new("priority", "Priority"),
            ],
        ))
        .unwrap();

    let mut panel = SettingsPanel::new();
    panel.open(&mut registry);
    control(&mut registry, "sortBy").edit(json!("priority"));
    panel.confirm(&mut registry).unwrap();
    assert!(!registry.is_bound("sortBy"));

    panel.open(&mut registry);
    assert_eq!(registry.widget("sortBy").unwrap().value(), json!("priority"));
}

#[test]
fn range_edits_mirror_into_live_label_and_clamp() {
    let (mut registry, _) = registry();
    registry
        .add_item(SettingDefinition::range(
            "refreshInterval",
            30.0,
            RangeBounds::new(5.0, 120.0, 5.0),
        ))
        .unwrap();

    let mut panel = SettingsPanel::new();
    panel.open(&mut registry);

    let display = probe(&mut registry, "refreshInterval");
    control(&mut registry, "refreshInterval").edit(json!(600.0));
    assert_eq!(display.value(), json!(120.0));
    assert_eq!(display.live_label().as_deref(), Some("120.0"));

    assert_eq!(registry.take("refreshInterval", false), Some(json!(120.0)));
    assert_eq!(registry.get("refreshInterval"), Some(json!(30.0)));
}

#[test]
fn disable_and_enable_flow_through_to_the_control() {
    let (mut registry, _) = registry();
    registry
        .add_item(SettingDefinition::text_line("greeting", "hi"))
        .unwrap();

    // before materialization both are silent no-ops
    registry.disable("greeting");
    registry.enable("greeting");

    let mut panel = SettingsPanel::new();
    panel.open(&mut registry);

    registry.disable("greeting");
    let display = probe(&mut registry, "greeting");
    assert!(!display.is_enabled());

    control(&mut registry, "greeting").edit(json!("ignored"));
    assert_eq!(display.value(), json!("hi"));

    registry.enable("greeting");
    assert!(display.is_enabled());
}

#[test]
fn take_and_save_persists_the_widget_value() {
    let (mut registry, store) = registry();
    registry
        .add_item(SettingDefinition::integer("maxItems", 1000))
        .unwrap();

    let mut panel = SettingsPanel::new();
    panel.open(&mut registry);
    control(&mut registry, "maxItems").edit(json!("250"));

    let value = registry.take_and_save("maxItems").unwrap();
    assert_eq!(value, Some(json!(250)));
    assert_eq!(
        store.document("settings.json").unwrap().get("maxItems"),
        Some(&json!(250))
    );
}

#[test]
fn hint_rows_materialize_and_stay_valueless() {
    let (mut registry, _) = registry();
    registry
        .add_item(
            SettingDefinition::hint("storageNote")
                .with_title("Storage")
                .with_description("Settings are stored per workspace"),
        )
        .unwrap();

    let mut panel = SettingsPanel::new();
    panel.open(&mut registry);
    assert!(registry.is_bound("storageNote"));
    assert_eq!(registry.take("storageNote", true), None);

    // hints carry a null value in the snapshot, buttons are excluded
    assert_eq!(registry.dump().get("storageNote"), Some(&Value::Null));
}
