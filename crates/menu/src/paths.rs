//! Back-path resolution for module scripts and icon assets.
//!
//! Script links and icon filenames arrive relative to the application root;
//! the back path is the prefix that addresses the root from wherever the
//! menu is rendered. Absolute references pass through untouched.

use crate::error::{MenuError, MenuResult};

/// Whether a path is an absolute reference.
pub fn is_absolute_path(path: &str) -> bool {
    path.starts_with('/')
}

/// Prefix a relative path with the back path.
///
/// Absolute and empty paths pass through unchanged. Malformed input is not
/// detected here; it also passes through.
pub fn resolve_back_path(path: &str, back_path: &str) -> String {
    if path.is_empty() || is_absolute_path(path) {
        path.to_string()
    } else {
        format!("{back_path}{path}")
    }
}

/// Append a `?` to a link unless it already contains one.
///
/// Idempotent, so decorated links can be decorated again without growing a
/// second separator.
pub fn append_questionmark(link: &str) -> String {
    if link.contains('?') {
        link.to_string()
    } else {
        format!("{link}?")
    }
}

/// Validate a configured back path.
///
/// Back paths are concatenated verbatim in front of relative links, so a
/// non-empty value must end with `/`.
pub fn validate_back_path(path: &str) -> MenuResult<()> {
    if path.is_empty() || path.ends_with('/') {
        Ok(())
    } else {
        Err(MenuError::InvalidBackPath(path.to_string()))
    }
}
