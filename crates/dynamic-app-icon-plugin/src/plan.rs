//! The full provisioning plan for an icon set.

use std::path::Path;

use serde::Serialize;

use dynamic_app_icon_core::{
    ComponentInfo, ComponentName, DEFAULT_IOS_ICON_PREFIX, DEFAULT_MAIN_ACTIVITY, IconConfig,
};

use crate::android::{self, ActivityAlias};
use crate::asset::RasterAsset;
use crate::declaration;
use crate::error::{ProvisionError, Result};
use crate::icon_set::IconSet;
use crate::ios::{self, IosPlistEntries};
use crate::logging::targets;

/// App-level inputs to the planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionOptions {
    /// Android application id, e.g. `com.app`.
    pub package: String,
    /// Main launcher activity; a leading `.` makes it package-relative.
    pub main_activity: String,
    /// Prefix of iOS alternate icon names in `Info.plist`.
    pub ios_icon_prefix: String,
    /// Whether the iOS app runs on iPad.
    pub supports_tablet: bool,
}

impl ProvisionOptions {
    /// Options with the default main activity and iOS prefix.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            main_activity: DEFAULT_MAIN_ACTIVITY.to_owned(),
            ios_icon_prefix: DEFAULT_IOS_ICON_PREFIX.to_owned(),
            supports_tablet: false,
        }
    }

    /// Options matching a runtime configuration.
    pub fn from_config(package: impl Into<String>, config: &IconConfig) -> Self {
        Self {
            main_activity: config.main_activity.clone(),
            ios_icon_prefix: config.ios_icon_prefix.clone(),
            ..Self::new(package)
        }
    }

    /// Set iPad support.
    pub fn with_tablet_support(mut self, supports_tablet: bool) -> Self {
        self.supports_tablet = supports_tablet;
        self
    }

    fn validate(&self) -> Result<()> {
        let package_ok = !self.package.is_empty()
            && self.package.split('.').all(|part| {
                !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            });
        if !package_ok {
            return Err(ProvisionError::invalid_option(
                "package",
                format!("'{}' is not a valid application id", self.package),
            ));
        }
        if self.main_activity.trim_start_matches('.').is_empty() {
            return Err(ProvisionError::invalid_option(
                "main_activity",
                "must be a non-empty class name",
            ));
        }
        Ok(())
    }

    /// Fully-qualified main activity class.
    pub fn main_activity_class(&self) -> String {
        if self.main_activity.starts_with('.') {
            format!("{}{}", self.package, self.main_activity)
        } else {
            self.main_activity.clone()
        }
    }
}

/// Everything the build step writes for one icon set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionPlan {
    /// Android application id the aliases belong to.
    pub package: String,
    /// Fully-qualified main activity class.
    pub main_activity: String,
    /// Icon names, in order.
    pub icons: Vec<String>,
    /// `<activity-alias>` entries, one per icon.
    pub aliases: Vec<ActivityAlias>,
    /// Mipmap images to render.
    pub android_assets: Vec<RasterAsset>,
    /// iOS alternate icon images to render.
    pub ios_assets: Vec<RasterAsset>,
    /// `Info.plist` alternate icon entries.
    pub ios_plist: IosPlistEntries,
    /// `IconName` union for the type declarations.
    pub type_declaration: String,
}

impl ProvisionPlan {
    /// Plan the outputs for `icons`.
    pub fn build(icons: &IconSet, options: &ProvisionOptions) -> Result<Self> {
        options.validate()?;
        icons.validate()?;

        let main_class = options.main_activity_class();
        let mut aliases = Vec::with_capacity(icons.len());
        let mut android_assets = Vec::new();
        let mut ios_assets = Vec::new();
        let mut ios_plist = IosPlistEntries::default();

        for (name, source) in icons.iter() {
            aliases.push(ActivityAlias::new(&main_class, &options.main_activity, name));
            android_assets.extend(android::icon_assets(name, source));
            ios::add_icon(
                name,
                source,
                &format!("{}{name}", options.ios_icon_prefix),
                options.supports_tablet,
                &mut ios_assets,
                &mut ios_plist,
            );
        }

        let plan = Self {
            package: options.package.clone(),
            main_activity: main_class,
            icons: icons.names().map(str::to_owned).collect(),
            aliases,
            android_assets,
            ios_assets,
            ios_plist,
            type_declaration: declaration::icon_name_union(icons.names()),
        };

        tracing::info!(
            target: targets::PLAN,
            package = %plan.package,
            icons = plan.icons.len(),
            android_assets = plan.android_assets.len(),
            ios_assets = plan.ios_assets.len(),
            "built provisioning plan"
        );
        Ok(plan)
    }

    /// Components a fresh install reports: the main activity enabled by
    /// default, every alias disabled.
    pub fn initial_components(&self) -> Vec<ComponentInfo> {
        let main = ComponentInfo::declared(
            ComponentName::new(&self.package, &self.main_activity),
            true,
        );
        std::iter::once(main)
            .chain(self.aliases.iter().map(|alias| alias.component(&self.package)))
            .collect()
    }

    /// A runtime configuration that only accepts the provisioned icons.
    pub fn icon_config(&self, base: &IconConfig) -> IconConfig {
        IconConfig {
            declared_icons: self.icons.clone(),
            ..base.clone()
        }
    }

    /// Pretty-printed JSON of the whole plan.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the plan as JSON to `path`.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| ProvisionError::io(path, e))?;
        tracing::debug!(target: targets::PLAN, path = %path.display(), "wrote provisioning plan");
        Ok(())
    }

    /// Narrow the `IconName` line of the declaration file at `path`.
    pub fn update_type_declaration(&self, path: &Path) -> Result<bool> {
        declaration::update_declaration_file(path, &self.type_declaration)
    }
}
