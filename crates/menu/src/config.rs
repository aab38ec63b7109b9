//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::paths;

/// Module menu configuration.
#[derive(Debug, Clone)]
pub struct MenuConfig {
    /// Relative path from the rendering script back to the application root
    /// (default: empty, the menu renders from the root itself).
    pub back_path: String,

    /// Directory against which relative icon filenames are probed for their
    /// pixel dimensions (default: current directory).
    pub asset_root: PathBuf,

    /// Whether the extension cache is active, which adds its clear action to
    /// the cache action list (default: false).
    pub extension_cache: bool,
}

impl MenuConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let back_path = env::var("BACK_PATH").unwrap_or_default();
        paths::validate_back_path(&back_path)
            .context("BACK_PATH must be empty or end with '/'")?;

        let asset_root = env::var("ASSET_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let extension_cache = env::var("EXTENSION_CACHE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            back_path,
            asset_root,
            extension_cache,
        })
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            back_path: String::new(),
            asset_root: PathBuf::from("."),
            extension_cache: false,
        }
    }
}
