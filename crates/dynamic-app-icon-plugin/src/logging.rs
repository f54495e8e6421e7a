//! Logging targets for the provisioning plan.
//!
//! Follows the same convention as `dynamic_app_icon_core::logging`: every
//! `tracing` call names one of these targets.

/// Target names for log filtering.
pub mod targets {
    /// Plugin crate target.
    pub const PLUGIN: &str = "dynamic_app_icon_plugin";

    /// Plan building and export.
    pub const PLAN: &str = "dynamic_app_icon_plugin::plan";

    /// Type declaration rewriting.
    pub const DECLARATION: &str = "dynamic_app_icon_plugin::declaration";
}
