//! Android launcher aliases and mipmap assets.
//!
//! Every alternate icon becomes an `<activity-alias>` that targets the main
//! activity and starts out disabled; the launcher shows whichever component
//! is enabled at runtime.

use std::path::{Path, PathBuf};

use serde::Serialize;

use dynamic_app_icon_core::{ComponentInfo, ComponentName};

use crate::asset::{AssetShape, RasterAsset};
use crate::icon_set::{DEFAULT_BACKGROUND_COLOR, IconSource};

/// Resource directory, relative to the Android project root.
pub const ANDROID_RES_DIR: &str = "app/src/main/res";

/// Launcher icon density buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AndroidDensity {
    /// ~160 dpi, the baseline.
    Mdpi,
    /// ~240 dpi.
    Hdpi,
    /// ~320 dpi.
    Xhdpi,
    /// ~480 dpi.
    Xxhdpi,
    /// ~640 dpi.
    Xxxhdpi,
}

impl AndroidDensity {
    /// All buckets, smallest first.
    pub const ALL: [AndroidDensity; 5] = [
        AndroidDensity::Mdpi,
        AndroidDensity::Hdpi,
        AndroidDensity::Xhdpi,
        AndroidDensity::Xxhdpi,
        AndroidDensity::Xxxhdpi,
    ];

    /// Edge length in pixels of a launcher icon in this bucket.
    pub fn icon_size(self) -> u32 {
        match self {
            AndroidDensity::Mdpi => 108,
            AndroidDensity::Hdpi => 162,
            AndroidDensity::Xhdpi => 216,
            AndroidDensity::Xxhdpi => 324,
            AndroidDensity::Xxxhdpi => 432,
        }
    }

    /// Resource folder name.
    pub fn folder(self) -> &'static str {
        match self {
            AndroidDensity::Mdpi => "mipmap-mdpi",
            AndroidDensity::Hdpi => "mipmap-hdpi",
            AndroidDensity::Xhdpi => "mipmap-xhdpi",
            AndroidDensity::Xxhdpi => "mipmap-xxhdpi",
            AndroidDensity::Xxxhdpi => "mipmap-xxxhdpi",
        }
    }
}

/// An `<activity-alias>` manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityAlias {
    /// Icon the alias presents.
    pub icon_name: String,
    /// Fully qualified alias class, e.g. `com.app.MainActivitydark`.
    pub name: String,
    /// `android:enabled`; always `false`, the runtime enables one alias at a time.
    pub enabled: bool,
    /// `android:exported`; the launcher must be able to start the alias.
    pub exported: bool,
    /// `@mipmap/<icon>`.
    pub icon: String,
    /// `@mipmap/<icon>_round`.
    pub round_icon: String,
    /// Activity the alias launches, e.g. `.MainActivity`.
    pub target_activity: String,
}

impl ActivityAlias {
    /// Alias for `icon_name` on top of `main_class`.
    pub fn new(main_class: &str, main_activity: &str, icon_name: &str) -> Self {
        Self {
            icon_name: icon_name.to_owned(),
            name: format!("{main_class}{icon_name}"),
            enabled: false,
            exported: true,
            icon: format!("@mipmap/{icon_name}"),
            round_icon: format!("@mipmap/{icon_name}_round"),
            target_activity: main_activity.to_owned(),
        }
    }

    /// Component the alias registers, as the manifest store sees it on install.
    pub fn component(&self, package: &str) -> ComponentInfo {
        ComponentInfo::alias(
            ComponentName::new(package, &self.name),
            &self.target_activity,
            self.enabled,
        )
    }
}

fn asset_path(density: AndroidDensity, file_name: &str) -> PathBuf {
    Path::new(ANDROID_RES_DIR)
        .join(density.folder())
        .join(file_name)
}

/// Mipmap images for one icon; empty when the icon has no Android source.
pub fn icon_assets(name: &str, source: &IconSource) -> Vec<RasterAsset> {
    let Some(image) = &source.android else {
        return Vec::new();
    };

    let mut assets = Vec::new();
    for density in AndroidDensity::ALL {
        let size = density.icon_size();
        for (shape, file_name) in [
            (AssetShape::Square, format!("{name}.png")),
            (AssetShape::Round, format!("{name}_round.png")),
        ] {
            assets.push(RasterAsset {
                icon: name.to_owned(),
                source: image.clone(),
                path: asset_path(density, &file_name),
                width: size,
                height: size,
                shape,
                background_color: Some(DEFAULT_BACKGROUND_COLOR.to_owned()),
            });
        }

        if let Some(adaptive) = &source.adaptive {
            assets.push(RasterAsset {
                icon: name.to_owned(),
                source: adaptive.foreground.clone(),
                path: asset_path(density, &format!("{name}_foreground.png")),
                width: size,
                height: size,
                shape: AssetShape::AdaptiveForeground,
                background_color: None,
            });
        }
    }
    assets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon_set::AdaptiveIcon;

    #[test]
    fn test_density_sizes() {
        let sizes: Vec<_> = AndroidDensity::ALL.iter().map(|d| d.icon_size()).collect();
        assert_eq!(sizes, vec![108, 162, 216, 324, 432]);
        assert_eq!(AndroidDensity::Xxhdpi.folder(), "mipmap-xxhdpi");
    }

    #[test]
    fn test_alias_fields() {
        let alias = ActivityAlias::new("com.app.MainActivity", ".MainActivity", "dark");
        assert_eq!(alias.name, "com.app.MainActivitydark");
        assert!(!alias.enabled);
        assert!(alias.exported);
        assert_eq!(alias.icon, "@mipmap/dark");
        assert_eq!(alias.round_icon, "@mipmap/dark_round");
        assert_eq!(alias.target_activity, ".MainActivity");

        let component = alias.component("com.app");
        assert_eq!(component.name.class_name(), "com.app.MainActivitydark");
        assert!(!component.is_enabled());
        assert!(component.targets("com.app.MainActivity"));
    }

    #[test]
    fn test_icon_assets() {
        let assets = icon_assets("dark", &IconSource::both("dark.png"));
        assert_eq!(assets.len(), 10);

        let round = assets
            .iter()
            .find(|a| a.shape == AssetShape::Round && a.width == 432)
            .unwrap();
        assert_eq!(
            round.path,
            Path::new("app/src/main/res/mipmap-xxxhdpi/dark_round.png")
        );
        assert_eq!(round.corner_radius(), 216);
    }

    #[test]
    fn test_adaptive_foreground() {
        let source = IconSource {
            android: Some("dark.png".into()),
            adaptive: Some(AdaptiveIcon {
                foreground: "fg.png".into(),
                background_color: "#000000".into(),
            }),
            ..IconSource::default()
        };
        let assets = icon_assets("dark", &source);
        assert_eq!(assets.len(), 15);

        let fg: Vec<_> = assets
            .iter()
            .filter(|a| a.shape == AssetShape::AdaptiveForeground)
            .collect();
        assert_eq!(fg.len(), 5);
        assert!(fg.iter().all(|a| a.background_color.is_none()));
        assert_eq!(fg[0].file_name(), Some("dark_foreground.png"));
    }

    #[test]
    fn test_no_android_source() {
        let source = IconSource {
            ios: Some("dark.png".into()),
            ..IconSource::default()
        };
        assert!(icon_assets("dark", &source).is_empty());
    }
}
