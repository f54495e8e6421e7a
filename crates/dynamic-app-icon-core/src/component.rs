//! Component addressing and enabled-state types.
//!
//! A launcher icon on Android is an activity (or activity-alias) component
//! whose enabled state decides whether the launcher shows it.

use std::fmt;

/// A (package, class) pair addressing one activity or activity-alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentName {
    package: String,
    class_name: String,
}

impl ComponentName {
    /// Create a component name.
    ///
    /// A class name starting with `.` is resolved relative to the package, as
    /// the manifest does for `android:name=".MainActivity"`.
    pub fn new(package: impl Into<String>, class_name: impl Into<String>) -> Self {
        let package = package.into();
        let class_name = class_name.into();
        let class_name = if class_name.starts_with('.') {
            format!("{package}{class_name}")
        } else {
            class_name
        };
        Self {
            package,
            class_name,
        }
    }

    /// The owning package.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The fully-qualified class or alias name.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.class_name)
    }
}

/// The enabled-state setting stored by the package manager for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnabledState {
    /// No override; whatever the manifest declares applies.
    #[default]
    Default,
    /// Explicitly enabled.
    Enabled,
    /// Explicitly disabled.
    Disabled,
}

/// Whether changing a component's state may kill the running process.
///
/// The reconciler only ever passes [`KillPolicy::DontKillApp`]; killing the
/// process to apply an icon change is not acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KillPolicy {
    /// Keep the running process alive.
    DontKillApp,
    /// Let the platform kill the process if it needs to.
    KillApp,
}

/// One entry of a package's component listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
    /// The component's address.
    pub name: ComponentName,
    /// The current state override.
    pub state: EnabledState,
    /// The `android:enabled` value declared in the manifest.
    pub enabled_by_default: bool,
    /// Fully-qualified `android:targetActivity` when the component is an
    /// activity-alias.
    pub target_activity: Option<String>,
}

impl ComponentInfo {
    /// Create a listing entry with no state override.
    pub fn declared(name: ComponentName, enabled_by_default: bool) -> Self {
        Self {
            name,
            state: EnabledState::Default,
            enabled_by_default,
            target_activity: None,
        }
    }

    /// Create a listing entry for an activity-alias of `target_activity`.
    ///
    /// A target starting with `.` is resolved against the alias's package.
    pub fn alias(
        name: ComponentName,
        target_activity: impl Into<String>,
        enabled_by_default: bool,
    ) -> Self {
        let target = ComponentName::new(name.package(), target_activity);
        Self {
            target_activity: Some(target.class_name().to_owned()),
            ..Self::declared(name, enabled_by_default)
        }
    }

    /// Whether this is an alias launching `activity`.
    pub fn targets(&self, activity: &str) -> bool {
        self.target_activity.as_deref() == Some(activity)
    }

    /// Whether the launcher currently shows this component.
    pub fn is_enabled(&self) -> bool {
        match self.state {
            EnabledState::Enabled => true,
            EnabledState::Disabled => false,
            EnabledState::Default => self.enabled_by_default,
        }
    }
}
