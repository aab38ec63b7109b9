//! Per-request user context consumed by the menu.
//!
//! The administration shell resolves these flags from the session and the
//! user's stored configuration before building the menu; this subsystem only
//! consumes them.

/// User context for the current administrative request.
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    /// Condensed display mode: frame routing collapses into a single
    /// combined navigation request instead of a frameset bootstrap.
    pub condensed_mode: bool,

    /// Permission-driven exclusion of the documentation module.
    pub hide_doc_module: bool,

    /// The client uses form-style controls, so activation controls blur
    /// themselves after the click.
    pub form_style_blur: bool,

    /// The session runs as a switched user, which relabels the logout
    /// button as an exit back to the original account.
    pub switch_user: bool,

    /// Verification token embedded in action URLs.
    pub verification_token: String,

    /// Main modules the user has collapsed in the menu.
    pub collapsed_modules: Vec<String>,
}

impl UserContext {
    /// Context with all flags off and an empty token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the user has collapsed the given main module.
    pub fn is_collapsed(&self, module_name: &str) -> bool {
        self.collapsed_modules.iter().any(|m| m == module_name)
    }
}
