//! Icon identifiers as seen by application code.

use std::fmt;

/// The sentinel reported for the app's primary icon.
pub const DEFAULT_ICON: &str = "DEFAULT";

/// An icon as named by application code: the primary icon or one of the
/// alternates provisioned at build time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IconIdentifier {
    /// The primary, undecorated icon.
    Default,
    /// A named alternate icon.
    Alternate(String),
}

impl IconIdentifier {
    /// Normalize a request: `None`, the empty string and `"DEFAULT"` all mean
    /// the primary icon.
    pub fn from_request(name: Option<&str>) -> Self {
        match name {
            None => Self::Default,
            Some(name) if name.is_empty() || name == DEFAULT_ICON => Self::Default,
            Some(name) => Self::Alternate(name.to_owned()),
        }
    }

    /// The string reported to application code.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Default => DEFAULT_ICON,
            Self::Alternate(name) => name,
        }
    }

    /// Whether this is the primary icon.
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Display for IconIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The answer to an icon change request.
///
/// Requests fail soft: any internal problem is logged and reported as
/// [`SetIconOutcome::Failed`] instead of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetIconOutcome {
    /// The change was accepted (or was already in effect).
    Requested(IconIdentifier),
    /// The request could not be recorded.
    Failed,
}

impl SetIconOutcome {
    /// The accepted identifier, if any.
    pub fn icon(&self) -> Option<&IconIdentifier> {
        match self {
            Self::Requested(icon) => Some(icon),
            Self::Failed => None,
        }
    }

    /// Whether the request was accepted.
    pub fn is_requested(&self) -> bool {
        matches!(self, Self::Requested(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_normalization() {
        assert_eq!(IconIdentifier::from_request(None), IconIdentifier::Default);
        assert_eq!(IconIdentifier::from_request(Some("")), IconIdentifier::Default);
        assert_eq!(
            IconIdentifier::from_request(Some("DEFAULT")),
            IconIdentifier::Default
        );
        assert_eq!(
            IconIdentifier::from_request(Some("dark")),
            IconIdentifier::Alternate("dark".into())
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(IconIdentifier::Default.to_string(), "DEFAULT");
        assert_eq!(IconIdentifier::Alternate("light".into()).to_string(), "light");
    }
}
