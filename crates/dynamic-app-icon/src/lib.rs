//! Dynamic App Icon - switch the launcher icon at runtime.
//!
//! This is the umbrella crate: it re-exports the core state machine and the
//! build-time provisioning plan, and adds the [`DynamicAppIcon`] entry point
//! that picks the right backend for the platform.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use dynamic_app_icon::{DynamicAppIcon, IconConfig, InMemoryHostContext, InMemoryManifestStore};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(InMemoryManifestStore::launcher_set("com.app", ".MainActivity", &["dark"]));
//!     let context = Arc::new(InMemoryHostContext::new("com.app"));
//!     let icons = DynamicAppIcon::android(store, context, IconConfig::default())?;
//!
//!     icons.set_app_icon(Some("dark"))?;
//!     // Forward Activity callbacks; the icon changes after onPause + grace delay.
//!     if let Some(lifecycle) = icons.lifecycle() {
//!         lifecycle.pause()?;
//!     }
//!     Ok(())
//! }
//! ```

mod app;
mod target;
pub mod prelude;

pub use app::DynamicAppIcon;
pub use dynamic_app_icon_core::*;
pub use target::Platform;

/// Build-time provisioning plan.
pub mod plugin {
    pub use dynamic_app_icon_plugin::*;
}
