//! Build-time provisioning for Dynamic App Icon.
//!
//! Turns an app's icon set into the things that must exist before the
//! runtime can switch icons: Android `<activity-alias>` entries and mipmap
//! images, iOS alternate icon images and `Info.plist` entries, and the
//! narrowed `IconName` type for the JavaScript package.
//!
//! The plan is pure data. Rendering images and patching native project
//! files is left to the build tooling that consumes it.
//!
//! # Example
//!
//! ```
//! use dynamic_app_icon_plugin::{IconSet, ProvisionOptions, ProvisionPlan};
//!
//! let icons = IconSet::from_json_str(r#"["./assets/light.png", "./assets/dark.png"]"#).unwrap();
//! let plan = ProvisionPlan::build(&icons, &ProvisionOptions::new("com.app")).unwrap();
//!
//! assert_eq!(plan.aliases[0].name, "com.app.MainActivity0");
//! assert_eq!(plan.type_declaration, r#"IconName: "0" | "1""#);
//! ```

mod android;
mod asset;
mod declaration;
mod error;
mod icon_set;
mod ios;
pub mod logging;
mod plan;

pub use android::{ANDROID_RES_DIR, ActivityAlias, AndroidDensity};
pub use asset::{AssetShape, RasterAsset};
pub use declaration::{icon_name_union, rewrite_declaration, update_declaration_file};
pub use error::{ProvisionError, Result};
pub use icon_set::{AdaptiveIcon, DEFAULT_BACKGROUND_COLOR, IconSet, IconSource, validate_icon_name};
pub use ios::{
    AlternateIconEntry, BundleIcons, IOS_FOLDER_NAME, IosIconDimension, IosPlistEntries, IosTarget,
    PRIMARY_ICON_NAME, PrimaryIconEntry,
};
pub use plan::{ProvisionOptions, ProvisionPlan};
