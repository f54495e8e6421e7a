//! Error types for the provisioning plan.

use std::path::PathBuf;

/// Result type alias for provisioning operations.
pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Errors that can occur while building or writing a provisioning plan.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    /// An icon name cannot be used as an alias suffix or asset name.
    #[error("Invalid icon name '{name}': {message}")]
    InvalidIconName { name: String, message: String },

    /// An option passed to the planner is unusable.
    #[error("Invalid value for option '{option}': {message}")]
    InvalidOption { option: String, message: String },

    /// The icon set could not be parsed.
    #[error("Failed to parse icon set: {0}")]
    Parse(#[from] serde_json::Error),

    /// The type declaration pattern failed to compile.
    #[error("Invalid declaration pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// File I/O error.
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProvisionError {
    /// Create an invalid-icon-name error.
    pub fn invalid_icon_name(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidIconName {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-option error.
    pub fn invalid_option(option: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
