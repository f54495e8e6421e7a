//! Runtime configuration.
//!
//! The configuration is a small TOML document; every field has a default so an
//! empty file (or no file at all) is valid.
//!
//! ```toml
//! grace_delay_ms = 500
//! main_activity = ".MainActivity"
//! commit_order = "disable-first"
//! ios_icon_prefix = "AppIcon-"
//! declared_icons = ["light", "dark"]
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{IconError, Result};
use crate::logging::targets;

/// Default delay between a pause and the commit it schedules.
pub const DEFAULT_GRACE_DELAY_MS: u64 = 500;

/// Upper bound for the grace delay.
pub const MAX_GRACE_DELAY_MS: u64 = 10_000;

/// Default main activity class, relative to the package.
pub const DEFAULT_MAIN_ACTIVITY: &str = ".MainActivity";

/// Default prefix of iOS alternate icon names.
pub const DEFAULT_IOS_ICON_PREFIX: &str = "AppIcon-";

/// Order of the two write phases of a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitOrder {
    /// Disable every other managed component, then enable the target.
    #[default]
    DisableFirst,
    /// Enable the target, then disable every other managed component.
    EnableFirst,
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconConfig {
    /// Milliseconds to wait after a pause before committing.
    pub grace_delay_ms: u64,

    /// Main launcher activity class; a leading `.` makes it package-relative.
    pub main_activity: String,

    /// Order of the disable and enable phases.
    pub commit_order: CommitOrder,

    /// Prefix the iOS bridge puts in front of alternate icon names.
    pub ios_icon_prefix: String,

    /// Icon names provisioned at build time. Empty disables request-time
    /// validation.
    pub declared_icons: Vec<String>,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            grace_delay_ms: DEFAULT_GRACE_DELAY_MS,
            main_activity: DEFAULT_MAIN_ACTIVITY.to_owned(),
            commit_order: CommitOrder::default(),
            ios_icon_prefix: DEFAULT_IOS_ICON_PREFIX.to_owned(),
            declared_icons: Vec::new(),
        }
    }
}

impl IconConfig {
    /// Parse and validate a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: IconConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| IconError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            target: targets::CONFIG,
            path = %path.display(),
            "loaded icon config"
        );
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.grace_delay_ms == 0 || self.grace_delay_ms > MAX_GRACE_DELAY_MS {
            return Err(IconError::invalid_config(
                "grace_delay_ms",
                format!("must be between 1 and {MAX_GRACE_DELAY_MS}"),
            ));
        }

        let class = self.main_activity.trim_start_matches('.');
        if class.is_empty() || class.contains(char::is_whitespace) {
            return Err(IconError::invalid_config(
                "main_activity",
                "must be a non-empty class name",
            ));
        }

        if let Some(name) = self
            .declared_icons
            .iter()
            .find(|name| name.is_empty() || name.as_str() == crate::icon::DEFAULT_ICON)
        {
            return Err(IconError::invalid_config(
                "declared_icons",
                format!("'{name}' is not a valid icon name"),
            ));
        }

        Ok(())
    }

    /// The grace delay as a duration.
    pub fn grace_delay(&self) -> Duration {
        Duration::from_millis(self.grace_delay_ms)
    }

    /// The fully-qualified main activity class for `package`.
    pub fn main_activity_class(&self, package: &str) -> String {
        if self.main_activity.starts_with('.') {
            format!("{package}{}", self.main_activity)
        } else {
            self.main_activity.clone()
        }
    }

    /// Whether `name` may be requested. Always true when no icons are declared.
    pub fn is_declared(&self, name: &str) -> bool {
        self.declared_icons.is_empty() || self.declared_icons.iter().any(|n| n == name)
    }
}
