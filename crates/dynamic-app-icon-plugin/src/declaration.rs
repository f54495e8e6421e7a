//! The `IconName` union in the JavaScript package's type declarations.
//!
//! The published declaration file carries a line like `IconName: string`.
//! After provisioning it is narrowed to the configured names so
//! `setAppIcon("drak")` fails to type-check.

use std::path::Path;

use regex::{NoExpand, Regex};

use crate::error::{ProvisionError, Result};
use crate::logging::targets;

const ICON_NAME_PATTERN: &str = r"IconName:\s.*";

/// The declaration line for `names`, e.g. `IconName: "light" | "dark"`.
pub fn icon_name_union<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let union = names
        .into_iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(" | ");

    if union.is_empty() {
        "IconName: string".to_owned()
    } else {
        format!("IconName: {union}")
    }
}

/// Replace the first `IconName:` line of `content` with `declaration`.
///
/// Content without such a line is returned unchanged.
pub fn rewrite_declaration(content: &str, declaration: &str) -> Result<String> {
    let pattern = Regex::new(ICON_NAME_PATTERN)?;
    Ok(pattern.replace(content, NoExpand(declaration)).into_owned())
}

/// Rewrite the declaration file at `path` in place.
///
/// Returns whether the file changed.
pub fn update_declaration_file(path: &Path, declaration: &str) -> Result<bool> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ProvisionError::io(path, e))?;
    let updated = rewrite_declaration(&content, declaration)?;
    if updated == content {
        tracing::debug!(
            target: targets::DECLARATION,
            path = %path.display(),
            "type declaration already up to date"
        );
        return Ok(false);
    }

    std::fs::write(path, updated).map_err(|e| ProvisionError::io(path, e))?;
    tracing::info!(
        target: targets::DECLARATION,
        path = %path.display(),
        %declaration,
        "updated type declaration"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union() {
        assert_eq!(
            icon_name_union(["light", "dark"]),
            r#"IconName: "light" | "dark""#
        );
        assert_eq!(icon_name_union(Vec::<&str>::new()), "IconName: string");
    }

    #[test]
    fn test_rewrite() {
        let content = "export type Props = {\n  IconName: string;\n  other: number;\n};\n";
        let rewritten = rewrite_declaration(content, r#"IconName: "dark""#).unwrap();
        assert_eq!(
            rewritten,
            "export type Props = {\n  IconName: \"dark\"\n  other: number;\n};\n"
        );
    }

    #[test]
    fn test_rewrite_without_declaration() {
        let content = "export {};\n";
        assert_eq!(
            rewrite_declaration(content, "IconName: string").unwrap(),
            content
        );
    }
}
