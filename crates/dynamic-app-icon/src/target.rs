//! Target platform detection.

use std::fmt;

/// Platform an app is running on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Android; icons switch through activity-alias components.
    Android,
    /// iOS; icons switch through the alternate icon API.
    Ios,
    /// A browser build. No launcher icon to switch.
    Web,
    /// Any other OS, by its `std::env::consts::OS` name.
    Other(String),
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_family = "wasm") {
            Platform::Web
        } else {
            Platform::Other(std::env::consts::OS.to_owned())
        }
    }

    /// Whether an icon-switching backend exists for this platform.
    pub fn supports_icon_switching(&self) -> bool {
        matches!(self, Platform::Android | Platform::Ios)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Android => f.write_str("android"),
            Platform::Ios => f.write_str("ios"),
            Platform::Web => f.write_str("web"),
            Platform::Other(name) => f.write_str(name),
        }
    }
}
