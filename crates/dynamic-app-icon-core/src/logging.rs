//! Logging facilities for Dynamic App Icon.
//!
//! Every subsystem logs through the `tracing` crate under its own target, so
//! hosts can filter the noisy parts (timer, dispatcher) independently of the
//! commit path. The library never installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("dynamic_app_icon_core::reconciler=debug")
//!         .init();
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "dynamic_app_icon_core";
    /// Icon request handler target.
    pub const REQUEST: &str = "dynamic_app_icon_core::request";
    /// Pending-change ledger target.
    pub const LEDGER: &str = "dynamic_app_icon_core::ledger";
    /// Lifecycle observer target.
    pub const LIFECYCLE: &str = "dynamic_app_icon_core::lifecycle";
    /// Component reconciler target.
    pub const RECONCILER: &str = "dynamic_app_icon_core::reconciler";
    /// Timer system target.
    pub const TIMER: &str = "dynamic_app_icon_core::timer";
    /// Lifecycle event dispatcher target.
    pub const DISPATCHER: &str = "dynamic_app_icon_core::dispatcher";
    /// Configuration loading target.
    pub const CONFIG: &str = "dynamic_app_icon_core::config";
}

