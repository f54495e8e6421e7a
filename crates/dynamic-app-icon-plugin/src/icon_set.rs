//! The icon set handed to the planner.
//!
//! Two input shapes are accepted, matching how apps configure the plugin:
//!
//! ```json
//! ["./assets/light.png", "./assets/dark.png"]
//! ```
//!
//! where each image is used for both platforms and the icons are named by
//! position (`"0"`, `"1"`, ...), or
//!
//! ```json
//! {
//!   "light": { "ios": "./assets/ios-light.png", "android": "./assets/android-light.png" },
//!   "dark": { "ios": "./assets/ios-dark.png", "prerendered": true }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use dynamic_app_icon_core::DEFAULT_ICON;

use crate::error::{ProvisionError, Result};

/// Background color applied when flattening transparent icons.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

/// Layers of an Android adaptive icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdaptiveIcon {
    /// Foreground layer image.
    pub foreground: PathBuf,
    /// Solid background layer color.
    #[serde(default = "default_background_color")]
    pub background_color: String,
}

fn default_background_color() -> String {
    DEFAULT_BACKGROUND_COLOR.to_owned()
}

/// Image sources for one alternate icon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IconSource {
    /// Source image for iOS; no iOS assets are produced without it.
    #[serde(default)]
    pub ios: Option<PathBuf>,
    /// Source image for Android; no Android assets are produced without it.
    #[serde(default)]
    pub android: Option<PathBuf>,
    /// Whether iOS should skip its gloss effect (`UIPrerenderedIcon`).
    #[serde(default)]
    pub prerendered: bool,
    /// Optional Android adaptive icon layers.
    #[serde(default)]
    pub adaptive: Option<AdaptiveIcon>,
}

impl IconSource {
    /// Use one image for both platforms.
    pub fn both(image: impl Into<PathBuf>) -> Self {
        let image = image.into();
        Self {
            ios: Some(image.clone()),
            android: Some(image),
            ..Self::default()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IconSetInput {
    List(Vec<PathBuf>),
    Map(BTreeMap<String, IconSource>),
}

impl From<IconSetInput> for IconSet {
    fn from(input: IconSetInput) -> Self {
        let icons = match input {
            IconSetInput::List(images) => images
                .into_iter()
                .enumerate()
                .map(|(index, image)| (index.to_string(), IconSource::both(image)))
                .collect(),
            IconSetInput::Map(icons) => icons,
        };
        Self { icons }
    }
}

/// Named alternate icons, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "IconSetInput")]
pub struct IconSet {
    icons: BTreeMap<String, IconSource>,
}

impl IconSet {
    /// An empty icon set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse either input shape from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add or replace an icon.
    pub fn with_icon(mut self, name: impl Into<String>, source: IconSource) -> Self {
        self.icons.insert(name.into(), source);
        self
    }

    /// Icon names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.icons.keys().map(String::as_str)
    }

    /// Icons with their sources, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IconSource)> {
        self.icons.iter().map(|(name, source)| (name.as_str(), source))
    }

    /// Number of icons.
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// Whether the set has no icons.
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Check every name can become an alias class suffix and a resource name.
    pub fn validate(&self) -> Result<()> {
        for name in self.icons.keys() {
            validate_icon_name(name)?;
        }
        Ok(())
    }
}

/// Icon names end up in Java class names and Android resource names, so
/// only ASCII letters, digits and underscores are allowed.
pub fn validate_icon_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ProvisionError::invalid_icon_name(name, "must not be empty"));
    }
    if name == DEFAULT_ICON {
        return Err(ProvisionError::invalid_icon_name(
            name,
            "is reserved for the primary icon",
        ));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
    {
        return Err(ProvisionError::invalid_icon_name(
            name,
            format!("contains '{bad}'; use letters, digits and '_'"),
        ));
    }
    Ok(())
}
