//! Prelude module for Dynamic App Icon.
//!
//! ```ignore
//! use dynamic_app_icon::prelude::*;
//! ```

// ============================================================================
// Entry point
// ============================================================================

pub use crate::{DynamicAppIcon, Platform};

// ============================================================================
// Icons and outcomes
// ============================================================================

pub use crate::{DEFAULT_ICON, IconIdentifier, SetIconOutcome};

// ============================================================================
// Configuration and errors
// ============================================================================

pub use crate::{IconConfig, IconError, Result};

// ============================================================================
// Platform seams
// ============================================================================

pub use crate::{AlternateIconResolver, ComponentManifestStore, HostContext, LifecycleProxy};
