//! Raster image outputs shared by both platforms.

use std::path::PathBuf;

use serde::Serialize;

/// How an output image is shaped from its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetShape {
    /// Full-bleed square, transparency flattened onto the background color.
    Square,
    /// Square with a corner radius of half the edge.
    Round,
    /// Adaptive icon foreground layer, transparency kept.
    AdaptiveForeground,
}

/// One image the build step must render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RasterAsset {
    /// Icon this image belongs to.
    pub icon: String,
    /// Image the asset is rendered from.
    pub source: PathBuf,
    /// Output path, relative to the platform project root.
    pub path: PathBuf,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Output shape.
    pub shape: AssetShape,
    /// Color transparency is flattened onto, if any.
    pub background_color: Option<String>,
}

impl RasterAsset {
    /// Corner radius in pixels for this asset's shape.
    pub fn corner_radius(&self) -> u32 {
        match self.shape {
            AssetShape::Round => self.width.min(self.height) / 2,
            AssetShape::Square | AssetShape::AdaptiveForeground => 0,
        }
    }

    /// File name of the output.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}
