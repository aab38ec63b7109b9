//! Navigation frame routing.
//!
//! A module that declares a navigation frame script does not load its
//! content directly: the link gets a prefix that first opens the frame
//! listing the module's sub-targets. Condensed mode folds both loads into a
//! single combined request; classic mode bootstraps a frameset. The
//! generated prefixes embed client-side concatenation tokens (`top.TS.*`)
//! that the administration shell substitutes at dispatch time.

use crate::paths;
use crate::registry::{ModuleDescriptor, SubmoduleDescriptor};
use crate::user::UserContext;

/// Frameset bootstrap endpoint used in classic (non-condensed) mode.
pub const FRAMESET_SCRIPT: &str = "mod_frameset.php";

/// Navigation frame settings after override-or-inherit resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSettings {
    /// Resolved navigation frame script.
    pub script: Option<String>,

    /// Resolved frame parameters. Script and parameters resolve
    /// independently, so a submodule can override one and inherit the other.
    pub param: Option<String>,
}

/// Resolve the frame settings for a module, letting the submodule override
/// each field independently.
pub fn resolve_frame_settings(
    module: &ModuleDescriptor,
    submodule: Option<&SubmoduleDescriptor>,
) -> FrameSettings {
    let script = submodule
        .and_then(|s| s.nav_frame_script.clone())
        .or_else(|| module.nav_frame_script.clone());
    let param = submodule
        .and_then(|s| s.nav_frame_script_param.clone())
        .or_else(|| module.nav_frame_script_param.clone());
    FrameSettings { script, param }
}

/// The resolved navigation frame target: the back-path-resolved script with
/// a guaranteed query separator, followed by the resolved parameters.
///
/// `None` when no frame script is configured at either level.
pub fn frame_target(
    module: &ModuleDescriptor,
    submodule: Option<&SubmoduleDescriptor>,
    back_path: &str,
) -> Option<String> {
    let settings = resolve_frame_settings(module, submodule);
    let script = settings.script?;
    let script = paths::append_questionmark(&paths::resolve_back_path(&script, back_path));
    Some(format!("{script}{}", settings.param.unwrap_or_default()))
}

/// URL prefix routing a module's content through its navigation frame.
///
/// Empty when no frame script is configured, in which case the module links
/// directly. Identical descriptors and flags yield identical prefixes.
pub fn frame_prefix(
    module: &ModuleDescriptor,
    submodule: Option<&SubmoduleDescriptor>,
    user: &UserContext,
    back_path: &str,
) -> String {
    let Some(target) = frame_target(module, submodule, back_path) else {
        return String::new();
    };

    if user.condensed_mode {
        format!("{target}&currentSubScript=")
    } else {
        format!(
            "{FRAMESET_SCRIPT}?fW=\"+top.TS.navFrameWidth+\"&nav=\"+top.TS.PATH_backend+\"{}&script=",
            urlencoding::encode(&target)
        )
    }
}
