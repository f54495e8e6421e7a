//! Provisioning plans driving the runtime, plus file outputs.

use std::sync::Arc;

use dynamic_app_icon_core::{
    ComponentName, ComponentReconciler, IconConfig, IconIdentifier, IconRequestHandler,
    InMemoryHostContext, InMemoryManifestStore, Ledger, SetIconOutcome,
};
use dynamic_app_icon_plugin::{IconSet, ProvisionError, ProvisionOptions, ProvisionPlan};

const ICONS: &str = r#"{
    "light": { "ios": "./assets/ios-light.png", "android": "./assets/android-light.png" },
    "dark": { "ios": "./assets/ios-dark.png", "prerendered": true }
}"#;

fn plan() -> ProvisionPlan {
    let icons = IconSet::from_json_str(ICONS).unwrap();
    ProvisionPlan::build(&icons, &ProvisionOptions::new("com.app").with_tablet_support(true))
        .unwrap()
}

#[test]
fn test_plan_outputs_per_platform() {
    let plan = plan();

    // Aliases exist for every icon, assets only where a source was given.
    assert_eq!(plan.aliases.len(), 2);
    assert!(plan.android_assets.iter().all(|a| a.icon == "light"));
    assert_eq!(plan.ios_assets.len(), 8);
    assert!(plan.ios_plist.ipad.alternates["AppIcon-dark"].prerendered);
    assert!(!plan.ios_plist.phone.alternates["AppIcon-light"].prerendered);
}

#[test]
fn test_planned_components_switch_at_runtime() {
    let plan = plan();
    let store = Arc::new(InMemoryManifestStore::new(plan.initial_components()));
    let context = Arc::new(InMemoryHostContext::new("com.app"));
    context.set_current_activity(Some(ComponentName::new("com.app", ".MainActivity")));
    let config = Arc::new(plan.icon_config(&IconConfig::default()));

    let ledger = Ledger::new();
    let handler = IconRequestHandler::new(ledger.clone(), context, config.clone());
    let reconciler = ComponentReconciler::new(store.clone(), config);

    assert_eq!(handler.set_icon(Some("plaid")), SetIconOutcome::Failed);
    assert_eq!(
        handler.set_icon(Some("dark")),
        SetIconOutcome::Requested(IconIdentifier::Alternate("dark".into()))
    );

    let report = reconciler.commit(&ledger);
    assert!(report.is_clean());
    assert_eq!(store.enabled_classes(), vec!["com.app.MainActivitydark"]);
}

#[test]
fn test_write_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dynamic-icons.json");

    plan().write_json(&path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["package"], "com.app");
    assert_eq!(value["icons"][1], "light");
}

#[test]
fn test_update_type_declaration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.d.ts");
    std::fs::write(&path, "export type Icons = {\n  IconName: string;\n};\n").unwrap();

    let plan = plan();
    assert!(plan.update_type_declaration(&path).unwrap());
    assert!(!plan.update_type_declaration(&path).unwrap());

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains(r#"IconName: "dark" | "light""#));
}

#[test]
fn test_missing_declaration_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = plan()
        .update_type_declaration(&dir.path().join("missing.d.ts"))
        .unwrap_err();
    assert!(matches!(err, ProvisionError::Io { .. }));
}
