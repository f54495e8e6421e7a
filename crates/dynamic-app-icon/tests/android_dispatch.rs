//! The Android backend end to end, through the real dispatcher thread.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::unbounded;
use dynamic_app_icon::prelude::*;
use dynamic_app_icon::{
    CommitOutcome, ComponentName, InMemoryHostContext, InMemoryManifestStore,
};

const DARK: &str = "com.app.MainActivitydark";
const TIMEOUT: Duration = Duration::from_secs(5);

fn short_grace() -> IconConfig {
    IconConfig {
        grace_delay_ms: 20,
        ..IconConfig::default()
    }
}

fn launcher() -> (Arc<InMemoryManifestStore>, Arc<InMemoryHostContext>) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let store = Arc::new(InMemoryManifestStore::launcher_set(
        "com.app",
        ".MainActivity",
        &["light", "dark"],
    ));
    let context = Arc::new(InMemoryHostContext::new("com.app"));
    context.set_current_activity(Some(ComponentName::new("com.app", ".MainActivity")));
    (store, context)
}

#[test]
fn test_commit_after_grace_delay() {
    let (store, context) = launcher();
    let (reports_tx, reports) = unbounded();
    let icons =
        DynamicAppIcon::android_with_reports(store.clone(), context, short_grace(), reports_tx)
            .unwrap();

    let outcome = icons.set_app_icon(Some("dark")).unwrap();
    assert!(outcome.is_requested());
    assert_eq!(store.toggle_count(), 0);
    assert_eq!(icons.get_app_icon().unwrap().as_str(), "dark");

    icons.lifecycle().unwrap().pause().unwrap();
    let report = reports.recv_timeout(TIMEOUT).unwrap();

    assert_eq!(report.outcome, CommitOutcome::Completed);
    assert_eq!(store.enabled_classes(), vec![DARK]);
    icons.shutdown();
}

#[test]
fn test_destroy_commits_immediately() {
    let (store, context) = launcher();
    let (reports_tx, reports) = unbounded();
    let config = IconConfig {
        grace_delay_ms: 10_000,
        ..IconConfig::default()
    };
    let icons =
        DynamicAppIcon::android_with_reports(store.clone(), context, config, reports_tx).unwrap();

    icons.set_app_icon(Some("dark")).unwrap();
    let lifecycle = icons.lifecycle().unwrap();
    lifecycle.pause().unwrap();
    lifecycle.destroy().unwrap();

    let report = reports.recv_timeout(TIMEOUT).unwrap();
    assert!(report.is_clean());
    assert_eq!(store.enabled_classes(), vec![DARK]);
    icons.shutdown();
}

#[test]
fn test_resume_within_grace_cancels() {
    let (store, context) = launcher();
    let (reports_tx, reports) = unbounded();
    let config = IconConfig {
        grace_delay_ms: 200,
        ..IconConfig::default()
    };
    let icons =
        DynamicAppIcon::android_with_reports(store.clone(), context, config, reports_tx).unwrap();

    icons.set_app_icon(Some("dark")).unwrap();
    let lifecycle = icons.lifecycle().unwrap();
    lifecycle.pause().unwrap();
    lifecycle.resume().unwrap();

    assert!(reports.recv_timeout(Duration::from_millis(500)).is_err());
    assert_eq!(store.toggle_count(), 0);
    icons.shutdown();
}

#[test]
fn test_android_rejects_invalid_config() {
    let (store, context) = launcher();
    let config = IconConfig {
        grace_delay_ms: 60_000,
        ..IconConfig::default()
    };
    assert!(matches!(
        DynamicAppIcon::android(store, context, config),
        Err(IconError::InvalidConfig { .. })
    ));
}

#[test]
fn test_lifecycle_after_shutdown() {
    let (store, context) = launcher();
    let icons = DynamicAppIcon::android(store, context, short_grace()).unwrap();
    let lifecycle = icons.lifecycle().unwrap();

    icons.shutdown();
    assert!(matches!(lifecycle.pause(), Err(IconError::DispatcherExited)));
}
