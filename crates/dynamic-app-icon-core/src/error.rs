//! Error types for Dynamic App Icon.

use std::path::PathBuf;

/// The main error type for Dynamic App Icon operations.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    /// The running platform has no icon-switching backend.
    #[error("Dynamic app icons are not supported on {platform}")]
    UnsupportedPlatform { platform: String },

    /// The requested icon is not in the configured `declared_icons` set.
    #[error("Icon '{name}' was not declared at build time")]
    UndeclaredIcon { name: String },

    /// A platform collaborator failed.
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// A configuration value is out of range or malformed.
    #[error("Invalid value for config option '{option}': {message}")]
    InvalidConfig { option: String, message: String },

    /// Failed to read a configuration file.
    #[error("Failed to read config '{path}': {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The lifecycle dispatcher thread has exited.
    #[error("The lifecycle dispatcher has already exited")]
    DispatcherExited,

    /// Failed to spawn the lifecycle dispatcher thread.
    #[error("Failed to spawn lifecycle dispatcher: {0}")]
    DispatcherSpawn(#[source] std::io::Error),
}

impl IconError {
    /// Create an unsupported-platform error.
    pub fn unsupported(platform: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            platform: platform.into(),
        }
    }

    /// Create an invalid-config error.
    pub fn invalid_config(option: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            option: option.into(),
            message: message.into(),
        }
    }
}

/// Timer-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    /// The timer ID is invalid or has already been removed.
    #[error("Invalid or expired timer ID")]
    InvalidTimerId,
}

/// Errors reported by platform collaborators (package manager, host context, icon resolver).
///
/// These never reach application code from the commit path; the reconciler logs
/// them and moves on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    /// The named component is not declared by the package.
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// The caller is not allowed to change the component state.
    #[error("Permission denied for component {0}")]
    PermissionDenied(String),

    /// The host application context is not available (e.g. no activity attached yet).
    #[error("Host context unavailable: {0}")]
    ContextUnavailable(String),

    /// Any other platform failure.
    #[error("Platform call failed: {0}")]
    Other(String),
}

/// A specialized Result type for Dynamic App Icon operations.
pub type Result<T> = std::result::Result<T, IconError>;

/// Result type returned by platform collaborators.
pub type PlatformResult<T> = std::result::Result<T, PlatformError>;
