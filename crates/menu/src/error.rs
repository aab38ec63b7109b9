//! Menu subsystem error types.

use thiserror::Error;

/// Errors surfaced while configuring the menu or consuming the registry
/// hand-off.
#[derive(Debug, Error)]
pub enum MenuError {
    /// A back path is concatenated verbatim in front of relative links and
    /// icon paths, so a non-empty value must end with `/`.
    #[error("invalid back path {0:?}: must be empty or end with '/'")]
    InvalidBackPath(String),

    /// The module registry hand-off could not be parsed.
    #[error("failed to parse module registry hand-off")]
    RegistryParse(#[from] serde_json::Error),
}

/// Result type alias using MenuError.
pub type MenuResult<T> = Result<T, MenuError>;
