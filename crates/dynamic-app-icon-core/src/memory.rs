//! In-memory platform doubles.
//!
//! [`InMemoryManifestStore`] behaves like a package manager's component table:
//! it honors enabled-state overrides, can be told to fail specific toggles or
//! the listing itself, and records every call it receives. It backs the test
//! suites and host-side simulations.

use std::collections::HashSet;

use parking_lot::Mutex;

use crate::component::{ComponentInfo, ComponentName, EnabledState, KillPolicy};
use crate::error::{PlatformError, PlatformResult};
use crate::platform::{ComponentManifestStore, HostContext};

/// A call received by the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    /// `list_components` for a package.
    List { package: String },
    /// `set_enabled_state` for a component.
    SetEnabledState {
        component: ComponentName,
        state: EnabledState,
        kill_policy: KillPolicy,
    },
}

#[derive(Debug, Default)]
struct StoreState {
    components: Vec<ComponentInfo>,
    failing: HashSet<String>,
    fail_listing: bool,
    calls: Vec<StoreCall>,
}

/// A component table held in memory.
#[derive(Debug, Default)]
pub struct InMemoryManifestStore {
    inner: Mutex<StoreState>,
}

impl InMemoryManifestStore {
    /// Create a store holding `components`.
    pub fn new(components: impl IntoIterator<Item = ComponentInfo>) -> Self {
        Self {
            inner: Mutex::new(StoreState {
                components: components.into_iter().collect(),
                ..StoreState::default()
            }),
        }
    }

    /// A freshly installed launcher set: the main activity enabled by default
    /// and one disabled alias `main_activity + icon` per icon name, each
    /// targeting the main activity.
    pub fn launcher_set(package: &str, main_activity: &str, icons: &[&str]) -> Self {
        let main = ComponentName::new(package, main_activity);
        let aliases = icons.iter().map(|icon| {
            ComponentInfo::alias(
                ComponentName::new(package, format!("{}{icon}", main.class_name())),
                main.class_name(),
                false,
            )
        });
        let mut components = vec![ComponentInfo::declared(main.clone(), true)];
        components.extend(aliases);
        Self::new(components)
    }

    /// Make every toggle of `class_name` fail until cleared.
    pub fn fail_toggles_for(&self, class_name: impl Into<String>) {
        self.inner.lock().failing.insert(class_name.into());
    }

    /// Make `list_components` fail (or succeed again).
    pub fn set_fail_listing(&self, fail: bool) {
        self.inner.lock().fail_listing = fail;
    }

    /// Remove all injected failures.
    pub fn clear_failures(&self) {
        let mut state = self.inner.lock();
        state.failing.clear();
        state.fail_listing = false;
    }

    /// Add a component to the table.
    pub fn insert(&self, info: ComponentInfo) {
        self.inner.lock().components.push(info);
    }

    /// Force a component's stored state, bypassing failure injection and the call log.
    pub fn force_state(&self, class_name: &str, state: EnabledState) -> bool {
        let mut inner = self.inner.lock();
        match inner
            .components
            .iter_mut()
            .find(|c| c.name.class_name() == class_name)
        {
            Some(info) => {
                info.state = state;
                true
            }
            None => false,
        }
    }

    /// A copy of the component table.
    pub fn components(&self) -> Vec<ComponentInfo> {
        self.inner.lock().components.clone()
    }

    /// Class names of every effectively enabled component.
    pub fn enabled_classes(&self) -> Vec<String> {
        self.inner
            .lock()
            .components
            .iter()
            .filter(|c| c.is_enabled())
            .map(|c| c.name.class_name().to_owned())
            .collect()
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner.lock().calls.clone()
    }

    /// Number of `set_enabled_state` calls received so far.
    pub fn toggle_count(&self) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, StoreCall::SetEnabledState { .. }))
            .count()
    }

    /// Forget the call log.
    pub fn clear_calls(&self) {
        self.inner.lock().calls.clear();
    }
}

impl ComponentManifestStore for InMemoryManifestStore {
    fn list_components(&self, package: &str) -> PlatformResult<Vec<ComponentInfo>> {
        let mut state = self.inner.lock();
        state.calls.push(StoreCall::List {
            package: package.to_owned(),
        });
        if state.fail_listing {
            return Err(PlatformError::Other(format!(
                "package info for {package} unavailable"
            )));
        }
        Ok(state
            .components
            .iter()
            .filter(|c| c.name.package() == package)
            .cloned()
            .collect())
    }

    fn set_enabled_state(
        &self,
        component: &ComponentName,
        new_state: EnabledState,
        kill_policy: KillPolicy,
    ) -> PlatformResult<()> {
        let mut state = self.inner.lock();
        state.calls.push(StoreCall::SetEnabledState {
            component: component.clone(),
            state: new_state,
            kill_policy,
        });
        if state.failing.contains(component.class_name()) {
            return Err(PlatformError::PermissionDenied(component.to_string()));
        }
        let info = state
            .components
            .iter_mut()
            .find(|c| &c.name == component)
            .ok_or_else(|| PlatformError::ComponentNotFound(component.to_string()))?;
        info.state = new_state;
        Ok(())
    }
}

/// A host context with a fixed package and a settable foreground activity.
#[derive(Debug, Default)]
pub struct InMemoryHostContext {
    package: Option<String>,
    activity: Mutex<Option<ComponentName>>,
}

impl InMemoryHostContext {
    /// A context for `package` with no activity attached.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: Some(package.into()),
            activity: Mutex::new(None),
        }
    }

    /// A context whose package lookup always fails.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Set (or clear) the foreground activity.
    pub fn set_current_activity(&self, activity: Option<ComponentName>) {
        *self.activity.lock() = activity;
    }
}

impl HostContext for InMemoryHostContext {
    fn package_name(&self) -> PlatformResult<String> {
        self.package
            .clone()
            .ok_or_else(|| PlatformError::ContextUnavailable("application context is null".into()))
    }

    fn current_activity(&self) -> Option<ComponentName> {
        self.activity.lock().clone()
    }
}
