//! Module icon resolution.
//!
//! Icons are regular image assets shipped with the backend. Resolution
//! produces the web path (back-path prefixed when relative), probes the
//! asset for its pixel dimensions, and renders the `img` markup. The probe
//! is best-effort: a missing or unreadable asset drops the size attributes
//! and nothing else.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::helpers::html_escape;
use crate::paths;

/// A resolved module icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconReference {
    /// Web path used as the `img` source.
    pub path: String,

    /// Pixel dimensions, absent when the asset could not be probed.
    pub size: Option<(u32, u32)>,

    /// Escaped accessible title text.
    pub title: String,

    /// Ready-to-embed `img` markup.
    pub html: String,
}

/// Resolves icon filenames into [`IconReference`] values.
#[derive(Debug, Clone)]
pub struct IconResolver {
    back_path: String,
    asset_root: PathBuf,
}

impl IconResolver {
    /// Create a resolver. Relative filenames are prefixed with `back_path`
    /// for the web and probed under `asset_root` on disk.
    pub fn new(back_path: impl Into<String>, asset_root: impl Into<PathBuf>) -> Self {
        Self {
            back_path: back_path.into(),
            asset_root: asset_root.into(),
        }
    }

    /// Resolve an icon filename into a reference with markup.
    pub fn resolve(&self, filename: &str, title: &str) -> IconReference {
        let web_path = paths::resolve_back_path(filename, &self.back_path);
        let size = probe_dimensions(&self.probe_path(filename));
        let title = html_escape(title);

        let size_attributes = match size {
            Some((width, height)) => format!(" width=\"{width}\" height=\"{height}\""),
            None => String::new(),
        };
        let html = format!(
            "<img src=\"{}\"{size_attributes} title=\"{title}\" alt=\"{title}\" />",
            html_escape(&web_path)
        );

        IconReference {
            path: web_path,
            size,
            title,
            html,
        }
    }

    /// Filesystem location used for the dimension probe.
    fn probe_path(&self, filename: &str) -> PathBuf {
        if paths::is_absolute_path(filename) {
            PathBuf::from(filename)
        } else {
            self.asset_root.join(filename)
        }
    }
}

/// Probe image dimensions, degrading to `None` on any failure.
fn probe_dimensions(path: &Path) -> Option<(u32, u32)> {
    match image::image_dimensions(path) {
        Ok(size) => Some(size),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "icon dimension probe failed");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_asset_drops_size_attributes() {
        let resolver = IconResolver::new("../", ".");
        let icon = resolver.resolve("gfx/does_not_exist.gif", "Web");

        assert_eq!(icon.path, "../gfx/does_not_exist.gif");
        assert_eq!(icon.size, None);
        assert!(icon.html.contains("src=\"../gfx/does_not_exist.gif\""));
        assert!(!icon.html.contains("width="));
        assert!(!icon.html.contains("height="));
    }

    #[test]
    fn test_absolute_filename_passes_through() {
        let resolver = IconResolver::new("../", ".");
        let icon = resolver.resolve("/assets/module.png", "File");
        assert_eq!(icon.path, "/assets/module.png");
    }

    #[test]
    fn test_title_is_escaped_in_markup() {
        let resolver = IconResolver::new("", ".");
        let icon = resolver.resolve("gfx/x.gif", "Tools & \"Setup\"");
        assert_eq!(icon.title, "Tools &amp; &quot;Setup&quot;");
        assert!(icon.html.contains("title=\"Tools &amp; &quot;Setup&quot;\""));
        assert!(icon.html.contains("alt=\"Tools &amp; &quot;Setup&quot;\""));
    }

    #[test]
    fn test_probe_reads_real_dimensions() {
        let dir = std::env::temp_dir();
        let filename = format!("quadro-menu-icon-{}.png", std::process::id());
        let asset = dir.join(&filename);
        image::RgbaImage::new(3, 2).save(&asset).unwrap();

        let resolver = IconResolver::new("", &dir);
        let icon = resolver.resolve(&filename, "Probe");
        std::fs::remove_file(&asset).unwrap();

        assert_eq!(icon.size, Some((3, 2)));
        assert!(icon.html.contains(" width=\"3\" height=\"2\""));
    }
}
