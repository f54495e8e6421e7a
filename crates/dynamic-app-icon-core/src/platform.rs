//! Seams to the host platform.
//!
//! The core never calls an OS API directly. Hosts implement these traits over
//! the real package manager and activity stack (or use the in-memory store in
//! tests).

use crate::component::{ComponentInfo, ComponentName, EnabledState, KillPolicy};
use crate::error::PlatformResult;

/// Read/write access to the installed package's component table.
pub trait ComponentManifestStore: Send + Sync {
    /// List every activity and activity-alias declared by `package`,
    /// including disabled ones.
    fn list_components(&self, package: &str) -> PlatformResult<Vec<ComponentInfo>>;

    /// Change the enabled state of one component.
    fn set_enabled_state(
        &self,
        component: &ComponentName,
        state: EnabledState,
        kill_policy: KillPolicy,
    ) -> PlatformResult<()>;
}

/// What the core needs to know about the running application.
pub trait HostContext: Send + Sync {
    /// The application's package identifier.
    fn package_name(&self) -> PlatformResult<String>;

    /// The component backing the foreground activity, if one is attached.
    fn current_activity(&self) -> Option<ComponentName>;
}

/// The iOS single-call alternate-icon primitive.
pub trait AlternateIconResolver: Send + Sync {
    /// Whether the device supports alternate icons at all.
    fn supports_alternate_icons(&self) -> bool;

    /// Switch to the named alternate icon, or back to the primary one with `None`.
    fn set_alternate_icon(&self, name: Option<&str>) -> PlatformResult<()>;

    /// The active alternate icon name, `None` for the primary icon.
    fn alternate_icon_name(&self) -> Option<String>;
}
