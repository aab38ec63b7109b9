//! Request-scoped module menu facade.
//!
//! One `ModuleMenu` is assembled per administrative request. It wires the
//! loader's registry hand-off, the user context, and the label collaborator
//! into the tree builder, the renderer, and the dispatch generator, and owns
//! the request-wide toggles those stages share.

use std::path::PathBuf;

use crate::cache_actions::{self, CacheAction};
use crate::config::MenuConfig;
use crate::dispatch::DispatchScriptGenerator;
use crate::error::MenuResult;
use crate::helpers::html_escape;
use crate::icon::IconResolver;
use crate::labels::LabelResolver;
use crate::paths;
use crate::registry::ModuleRegistry;
use crate::render::MenuRenderer;
use crate::tree::{ModuleTree, ModuleTreeBuilder, SubmoduleNode};
use crate::user::UserContext;

/// Request-scoped module menu.
pub struct ModuleMenu<'a> {
    registry: ModuleRegistry,
    user: &'a UserContext,
    labels: &'a dyn LabelResolver,
    back_path: String,
    asset_root: PathBuf,
    link_modules: bool,
    cache_actions: Vec<CacheAction>,
}

impl<'a> ModuleMenu<'a> {
    /// Assemble the menu for one request.
    ///
    /// The cache action list is fixed here from the configuration; later
    /// back path changes affect only tree, icon, and link resolution.
    pub fn new(
        registry: ModuleRegistry,
        user: &'a UserContext,
        labels: &'a dyn LabelResolver,
        config: &MenuConfig,
    ) -> Self {
        let cache_actions = cache_actions::build_cache_actions(config, user, labels);
        Self {
            registry,
            user,
            labels,
            back_path: config.back_path.clone(),
            asset_root: config.asset_root.clone(),
            link_modules: true,
            cache_actions,
        }
    }

    /// Set the path back to the application root for subsequent icon and
    /// link resolution.
    pub fn set_back_path(&mut self, back_path: impl Into<String>) -> MenuResult<()> {
        let back_path = back_path.into();
        paths::validate_back_path(&back_path)?;
        self.back_path = back_path;
        Ok(())
    }

    /// Toggle activation controls and dispatch cases globally.
    pub fn set_link_modules(&mut self, link_modules: bool) {
        self.link_modules = link_modules;
    }

    /// The loaded module registry.
    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Build the normalized module tree. Built fresh on every call.
    pub fn tree(&self) -> ModuleTree {
        let icons = IconResolver::new(self.back_path.clone(), self.asset_root.clone());
        ModuleTreeBuilder::new(&self.registry, self.user, self.labels, &icons, &self.back_path)
            .build()
    }

    /// Render the menu as a nested unordered list.
    pub fn render(&self) -> String {
        MenuRenderer::new(self.user, self.link_modules).render(&self.tree())
    }

    /// Render a standalone submodule list.
    pub fn render_submodules(&self, submodules: &[SubmoduleNode]) -> String {
        MenuRenderer::new(self.user, self.link_modules).render_submodules(submodules)
    }

    /// Generate the client-side dispatch routine for the current tree.
    pub fn dispatch_script(&self) -> String {
        DispatchScriptGenerator::new(self.user, self.link_modules).generate(&self.tree())
    }

    /// The fixed cache action list.
    pub fn cache_actions(&self) -> &[CacheAction] {
        &self.cache_actions
    }

    /// Render the cache action list.
    pub fn render_cache_actions(&self) -> String {
        cache_actions::render_cache_actions(&self.cache_actions)
    }

    /// Render the logout form snippet.
    ///
    /// Switched-user sessions get an exit label instead, since submitting
    /// returns to the original account rather than ending the session.
    pub fn render_logout_button(&self) -> String {
        let label = if self.user.switch_user {
            self.labels
                .button_label("buttons.exit")
                .unwrap_or_else(|| "Exit".to_string())
        } else {
            self.labels
                .button_label("buttons.logout")
                .unwrap_or_else(|| "Logout".to_string())
        };

        format!(
            "<form action=\"logout.php\" target=\"_top\">\n  <input type=\"submit\" value=\"{}\" />\n</form>\n",
            html_escape(&label)
        )
    }
}
