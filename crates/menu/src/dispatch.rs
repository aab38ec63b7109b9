//! Client-side dispatch script generation.
//!
//! The emitted `goToModule` routine runs in the administration shell's top
//! frame; this module only templates deterministic source text for it. The
//! frame targets (`top.content` and its `list_frame`/`nav_frame` panes) and
//! the state objects (`top.fsMod`, `top.TS`) are the shell's protocol, not
//! objects modeled here. Generation is a pure function of the tree and the
//! user context.

use tracing::debug;

use crate::paths;
use crate::tree::{ModuleNode, ModuleTree, SubmoduleNode};
use crate::user::UserContext;

/// Intermediate loader bootstrapping the list frame on a cold module switch
/// in classic mode.
pub const LISTFRAME_LOADER_SCRIPT: &str = "listframe_loader.php";

/// Generates the `goToModule` switch routine for a built tree.
pub struct DispatchScriptGenerator<'a> {
    user: &'a UserContext,
    link_modules: bool,
}

impl<'a> DispatchScriptGenerator<'a> {
    /// Create a generator. `link_modules` matches the renderer's toggle, so
    /// every emitted case corresponds to a rendered activation control.
    pub fn new(user: &'a UserContext, link_modules: bool) -> Self {
        Self { user, link_modules }
    }

    /// Generate the complete dispatch routine.
    pub fn generate(&self, tree: &ModuleTree) -> String {
        let mut cases = Vec::new();

        for node in tree.iter() {
            if node.subitems.is_empty() {
                if !node.link.is_empty() && self.link_modules {
                    cases.push(self.main_module_case(node));
                }
                continue;
            }
            for submodule in &node.subitems {
                if !submodule.link.is_empty() && self.link_modules {
                    cases.push(self.submodule_case(node, submodule));
                }
            }
        }

        debug!(cases = cases.len(), "generated module dispatch script");

        format!(
            r#"var currentModuleLoaded = "";
function goToModule(modName, cMR_flag, addGetVars) {{
  var additionalGetVariables = "";
  if (addGetVars) additionalGetVariables = addGetVars;

  var cMR = 0;
  if (cMR_flag) cMR = 1;

  currentModuleLoaded = modName;

  switch (modName) {{
{cases}
  }}
}}
"#,
            cases = cases.join("\n")
        )
    }

    /// Case for a single-destination module (no submodules, linked itself).
    ///
    /// The trailing `1` asks the highlighter to expand the module's group.
    fn main_module_case(&self, node: &ModuleNode) -> String {
        let link = paths::append_questionmark(&node.link);
        format!(
            r#"  case '{name}':
    top.content.location = top.getModuleUrl(top.TS.PATH_backend+"{link}"+additionalGetVariables);
    top.highlightModuleMenuItem("{css_id}", 1);
    break;"#,
            name = node.name,
            css_id = node.css_id
        )
    }

    /// Case for a submodule destination.
    fn submodule_case(&self, parent: &ModuleNode, submodule: &SubmoduleNode) -> String {
        let parent_name = &parent.name;

        // Query fragment carrying the remembered record id when the parent
        // routes through a navigation frame.
        let mut id_carrier = String::new();
        if submodule.parent_nav_frame_script.is_some() {
            id_carrier =
                format!("+'&id='+top.rawurlencode(top.fsMod.recentIds['{parent_name}'])");
            if self.user.condensed_mode {
                id_carrier.push_str("+(cMR?'&cMR=1':'')");
            }
        }

        let link = paths::append_questionmark(&submodule.link);
        let mut command = format!(
            r#"    top.content.location = top.getModuleUrl(top.TS.PATH_backend+"{link}"{id_carrier}+additionalGetVariables);
    top.fsMod.currentMainLoaded = "{parent_name}";
"#
        );
        if submodule.nav_frame_script.is_some() {
            command.push_str(&format!(
                "    top.currentSubScript = \"{}\";\n",
                submodule.original_link
            ));
        }

        // Classic frameset mode replaces the plain navigation wholesale with
        // a reuse-or-bootstrap branch.
        if !self.user.condensed_mode && submodule.parent_nav_frame_script.is_some() {
            command = self.frameset_switch_command(parent_name, submodule, &id_carrier, &link);
        }

        command.push_str(&format!(
            "    top.highlightModuleMenuItem(\"{}\");\n",
            submodule.css_id
        ));

        format!(
            "  case '{name}':\n{command}    break;",
            name = submodule.name
        )
    }

    /// The classic-frameset navigation: reuse the loaded frame pair when the
    /// same main module is active, otherwise reload the whole content frame,
    /// through the list frame loader when a next-load URL is pending.
    fn frameset_switch_command(
        &self,
        parent_name: &str,
        submodule: &SubmoduleNode,
        id_carrier: &str,
        link: &str,
    ) -> String {
        let nav_target = submodule.nav_target.as_deref().unwrap_or_default();
        let original = paths::append_questionmark(&submodule.original_link);

        // The loader carries an exit script parameter only when a frame
        // prefix exists.
        let loader = if submodule.prefix.is_empty() {
            LISTFRAME_LOADER_SCRIPT.to_string()
        } else {
            format!("{link}&exScript={LISTFRAME_LOADER_SCRIPT}")
        };

        format!(
            r#"    if (top.content.list_frame && top.fsMod.currentMainLoaded == "{parent_name}") {{
      top.currentSubScript = "{original_link}";
      top.content.list_frame.location = top.getModuleUrl(top.TS.PATH_backend+"{original}"{id_carrier}+additionalGetVariables);
      if (top.currentSubNavScript != "{nav_target}") {{
        top.currentSubNavScript = "{nav_target}";
        top.content.nav_frame.location = top.getModuleUrl(top.TS.PATH_backend+"{nav_target}");
      }}
    }} else {{
      top.content.location = top.TS.PATH_backend+(
        top.nextLoadModuleUrl ?
        "{loader}" :
        "{link}"{id_carrier}+additionalGetVariables
      );
      top.fsMod.currentMainLoaded = "{parent_name}";
      top.currentSubScript = "{original_link}";
    }}
"#,
            original_link = submodule.original_link
        )
    }
}
