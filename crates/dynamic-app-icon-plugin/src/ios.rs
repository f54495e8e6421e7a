//! iOS alternate icon files and `Info.plist` entries.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::asset::{AssetShape, RasterAsset};
use crate::icon_set::{DEFAULT_BACKGROUND_COLOR, IconSource};

/// Folder the alternate icon images are written to inside the app target.
pub const IOS_FOLDER_NAME: &str = "DynamicAppIcons";

/// Device family an icon file is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IosTarget {
    /// iPhone, and iPad running phone-only apps.
    Phone,
    /// iPad with tablet support.
    Ipad,
}

/// One rendered size of an alternate icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IosIconDimension {
    /// Scale factor; part of the file name.
    pub scale: u32,
    /// Size in points.
    pub size: u32,
    /// Explicit pixel width, when it isn't `size * scale`.
    pub width: Option<u32>,
    /// Explicit pixel height, when it isn't `size * scale`.
    pub height: Option<u32>,
    /// Device family the file is for.
    pub target: IosTarget,
}

impl IosIconDimension {
    /// Every dimension alternate icons are rendered at.
    pub const ALL: [IosIconDimension; 4] = [
        IosIconDimension::phone(2),
        IosIconDimension::phone(3),
        IosIconDimension::ipad(2, 152),
        IosIconDimension::ipad(3, 167),
    ];

    const fn phone(scale: u32) -> Self {
        Self {
            scale,
            size: 60,
            width: None,
            height: None,
            target: IosTarget::Phone,
        }
    }

    const fn ipad(scale: u32, pixels: u32) -> Self {
        Self {
            scale,
            size: 60,
            width: Some(pixels),
            height: Some(pixels),
            target: IosTarget::Ipad,
        }
    }

    /// Dimensions to render, dropping iPad sizes when the app isn't a tablet app.
    pub fn for_app(supports_tablet: bool) -> impl Iterator<Item = IosIconDimension> {
        Self::ALL
            .into_iter()
            .filter(move |d| supports_tablet || d.target == IosTarget::Phone)
    }

    /// Width of the rendered file in pixels.
    pub fn pixel_width(&self) -> u32 {
        self.width.unwrap_or(self.size * self.scale)
    }

    /// Height of the rendered file in pixels.
    pub fn pixel_height(&self) -> u32 {
        self.height.unwrap_or(self.size * self.scale)
    }

    /// Base name iOS resolves scale and device suffixes from, e.g. `dark-Icon-60x60`.
    pub fn icon_name(&self, name: &str) -> String {
        format!("{name}-Icon-{size}x{size}", size = self.size)
    }

    /// Full file name, e.g. `dark-Icon-60x60@3x~ipad.png`.
    pub fn file_name(&self, name: &str) -> String {
        let target = match self.target {
            IosTarget::Phone => "",
            IosTarget::Ipad => "~ipad",
        };
        format!("{}@{}x{}.png", self.icon_name(name), self.scale, target)
    }
}

/// Name of the app's primary icon set in the asset catalog.
pub const PRIMARY_ICON_NAME: &str = "AppIcon";

/// An entry under `CFBundleAlternateIcons`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternateIconEntry {
    /// Base file names, without scale or device suffixes.
    #[serde(rename = "CFBundleIconFiles")]
    pub icon_files: Vec<String>,
    /// Whether iOS should skip its gloss effect.
    #[serde(rename = "UIPrerenderedIcon")]
    pub prerendered: bool,
}

/// The `CFBundlePrimaryIcon` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimaryIconEntry {
    /// Asset catalog icon set names.
    #[serde(rename = "CFBundleIconFiles")]
    pub icon_files: Vec<String>,
}

impl Default for PrimaryIconEntry {
    fn default() -> Self {
        Self {
            icon_files: vec![PRIMARY_ICON_NAME.to_owned()],
        }
    }
}

/// The value of one `CFBundleIcons*` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BundleIcons {
    /// The icon shown when no alternate is set.
    #[serde(rename = "CFBundlePrimaryIcon")]
    pub primary: PrimaryIconEntry,
    /// Alternate icons keyed by the name passed to `setAlternateIconName`.
    #[serde(rename = "CFBundleAlternateIcons")]
    pub alternates: BTreeMap<String, AlternateIconEntry>,
}

impl BundleIcons {
    /// Whether no alternate icon is registered.
    pub fn is_empty(&self) -> bool {
        self.alternates.is_empty()
    }
}

/// The `Info.plist` keys the plan writes.
///
/// `CFBundleIcons` is always written; `CFBundleIcons~ipad` only when some
/// icon has iPad variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IosPlistEntries {
    /// `CFBundleIcons`.
    #[serde(rename = "CFBundleIcons")]
    pub phone: BundleIcons,
    /// `CFBundleIcons~ipad`.
    #[serde(rename = "CFBundleIcons~ipad", skip_serializing_if = "BundleIcons::is_empty")]
    pub ipad: BundleIcons,
}

impl IosPlistEntries {
    fn icons_mut(&mut self, target: IosTarget) -> &mut BundleIcons {
        match target {
            IosTarget::Phone => &mut self.phone,
            IosTarget::Ipad => &mut self.ipad,
        }
    }

    /// Icons registered for `target`.
    pub fn icons(&self, target: IosTarget) -> &BundleIcons {
        match target {
            IosTarget::Phone => &self.phone,
            IosTarget::Ipad => &self.ipad,
        }
    }

    /// Whether no alternate icon is registered for any device family.
    pub fn is_empty(&self) -> bool {
        self.phone.is_empty() && self.ipad.is_empty()
    }
}

/// Image files and plist entries for one icon; nothing when it has no iOS source.
pub(crate) fn add_icon(
    name: &str,
    source: &IconSource,
    plist_key: &str,
    supports_tablet: bool,
    assets: &mut Vec<RasterAsset>,
    plist: &mut IosPlistEntries,
) {
    let Some(image) = &source.ios else {
        return;
    };

    for dimension in IosIconDimension::for_app(supports_tablet) {
        plist.icons_mut(dimension.target).alternates.insert(
            plist_key.to_owned(),
            AlternateIconEntry {
                icon_files: vec![dimension.icon_name(name)],
                prerendered: source.prerendered,
            },
        );

        assets.push(RasterAsset {
            icon: name.to_owned(),
            source: image.clone(),
            path: icon_path(&dimension.file_name(name)),
            width: dimension.pixel_width(),
            height: dimension.pixel_height(),
            shape: AssetShape::Square,
            background_color: Some(DEFAULT_BACKGROUND_COLOR.to_owned()),
        });
    }
}

fn icon_path(file_name: &str) -> PathBuf {
    Path::new(IOS_FOLDER_NAME).join(file_name)
}
