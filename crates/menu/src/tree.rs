//! Normalized module tree.
//!
//! The tree is the one derived structure the renderer and the dispatch
//! generator share: a registry-ordered, exactly-two-level list of module
//! nodes with resolved titles, icons, links, and frame routing. It is built
//! fresh per request and never mutates the registry it was built from.

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::frame;
use crate::icon::{IconReference, IconResolver};
use crate::labels::LabelResolver;
use crate::paths;
use crate::registry::ModuleRegistry;
use crate::user::UserContext;

/// Module excluded from the menu when the user context hides it.
pub const DOC_MODULE_KEY: &str = "doc";

/// A normalized top-level module node.
#[derive(Debug, Clone)]
pub struct ModuleNode {
    /// Module name (the registry key).
    pub name: String,

    /// Element key for lookups and label resolution: `{name}_tab`.
    pub element_key: String,

    /// Resolved display title. May be empty when nothing resolves.
    pub title: String,

    /// Client dispatch call for the activation control.
    pub on_click: String,

    /// Deterministic CSS-safe element id.
    pub css_id: String,

    /// Resolved icon, absent when no filename is registered for the key.
    pub icon: Option<IconReference>,

    /// Final link. Frame-prefixed when frame routing applies; empty for
    /// grouping nodes with submodules.
    pub link: String,

    /// The back-path-resolved link without any frame prefix.
    pub original_link: String,

    /// Navigation frame prefix, empty when the module links directly.
    pub prefix: String,

    /// Ordered submodule nodes.
    pub subitems: Vec<SubmoduleNode>,
}

/// A normalized submodule node.
#[derive(Debug, Clone)]
pub struct SubmoduleNode {
    /// Composed name: `{parent}_{submodule}`.
    pub name: String,

    /// Element key for lookups and label resolution: `{name}_tab`.
    pub element_key: String,

    /// Resolved display title.
    pub title: String,

    /// Resolved description, used as the activation control's title text.
    pub description: String,

    /// Client dispatch call for the activation control.
    pub on_click: String,

    /// Deterministic CSS-safe element id.
    pub css_id: String,

    /// Resolved icon, absent when no filename is registered for the key.
    pub icon: Option<IconReference>,

    /// Final link, frame-prefixed when frame routing applies.
    pub link: String,

    /// The back-path-resolved link without any frame prefix. The dispatch
    /// generator needs it for frame-reuse navigation.
    pub original_link: String,

    /// Navigation frame prefix, empty when the submodule links directly.
    pub prefix: String,

    /// Resolved navigation frame target (script plus parameters), present
    /// whenever the submodule or its parent declares a frame script.
    pub nav_target: Option<String>,

    /// The submodule's own navigation frame script, when declared.
    pub nav_frame_script: Option<String>,

    /// The parent's navigation frame script, when the parent declares one.
    pub parent_nav_frame_script: Option<String>,
}

/// Registry-ordered tree of normalized module nodes.
#[derive(Debug, Clone, Default)]
pub struct ModuleTree {
    nodes: Vec<ModuleNode>,
}

impl ModuleTree {
    /// Look up a module node by element key.
    pub fn get(&self, element_key: &str) -> Option<&ModuleNode> {
        self.nodes.iter().find(|n| n.element_key == element_key)
    }

    /// Iterate nodes in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleNode> {
        self.nodes.iter()
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Client-side seeding for the remembered-record-id store: one line per
    /// module routed through a navigation frame, in tree order.
    pub fn frame_state_script(&self) -> String {
        self.nodes
            .iter()
            .filter(|node| !node.prefix.is_empty())
            .map(|node| format!("top.fsMod.recentIds[\"{}\"] = \"\";\n", node.name))
            .collect()
    }
}

/// Builds the normalized tree for one request.
pub struct ModuleTreeBuilder<'a> {
    registry: &'a ModuleRegistry,
    user: &'a UserContext,
    labels: &'a dyn LabelResolver,
    icons: &'a IconResolver,
    back_path: &'a str,
}

impl<'a> ModuleTreeBuilder<'a> {
    /// Wire a builder to its collaborators.
    pub fn new(
        registry: &'a ModuleRegistry,
        user: &'a UserContext,
        labels: &'a dyn LabelResolver,
        icons: &'a IconResolver,
        back_path: &'a str,
    ) -> Self {
        Self {
            registry,
            user,
            labels,
            icons,
            back_path,
        }
    }

    /// Build the tree in registry order.
    pub fn build(&self) -> ModuleTree {
        let mut nodes = Vec::new();

        for module in self.registry.iter() {
            if self.user.hide_doc_module && module.key == DOC_MODULE_KEY {
                continue;
            }

            let prefix = frame::frame_prefix(module, None, self.user, self.back_path);

            // A module with submodules is a grouping node without an own
            // destination; its script is ignored.
            let original_link = if module.sub.is_empty() {
                paths::resolve_back_path(
                    module.script.as_deref().unwrap_or_default(),
                    self.back_path,
                )
            } else {
                String::new()
            };
            let link = if !original_link.is_empty() && !prefix.is_empty() {
                format!("{prefix}{}", urlencoding::encode(&original_link))
            } else {
                original_link.clone()
            };

            let element_key = format!("{}_tab", module.key);
            let title = self
                .labels
                .module_title(&element_key)
                .unwrap_or_else(|| module.title.clone());
            let icon = self.resolve_icon(&element_key, &title);

            let mut node = ModuleNode {
                name: module.key.clone(),
                on_click: format!("top.goToModule('{}');", module.key),
                css_id: css_id(&module.key),
                element_key,
                title,
                icon,
                link,
                original_link,
                prefix,
                subitems: Vec::new(),
            };

            for submodule in &module.sub {
                let sub_prefix =
                    frame::frame_prefix(module, Some(submodule), self.user, self.back_path);
                let original_link = paths::resolve_back_path(
                    submodule.script.as_deref().unwrap_or_default(),
                    self.back_path,
                );
                let link = if !original_link.is_empty() && !sub_prefix.is_empty() {
                    format!("{sub_prefix}{}", urlencoding::encode(&original_link))
                } else {
                    original_link.clone()
                };

                let name = format!("{}_{}", module.key, submodule.key);
                let element_key = format!("{name}_tab");
                let title = self
                    .labels
                    .module_title(&element_key)
                    .unwrap_or_else(|| submodule.title.clone());
                let description = self
                    .labels
                    .module_description(&element_key)
                    .unwrap_or_else(|| submodule.description.clone());
                let icon = self.resolve_icon(&element_key, &title);

                node.subitems.push(SubmoduleNode {
                    on_click: format!("top.goToModule('{name}');"),
                    css_id: css_id(&name),
                    name,
                    element_key,
                    title,
                    description,
                    icon,
                    link,
                    original_link,
                    prefix: sub_prefix,
                    nav_target: frame::frame_target(module, Some(submodule), self.back_path),
                    nav_frame_script: submodule.nav_frame_script.clone(),
                    parent_nav_frame_script: module.nav_frame_script.clone(),
                });
            }

            nodes.push(node);
        }

        debug!(modules = nodes.len(), "built module menu tree");
        ModuleTree { nodes }
    }

    fn resolve_icon(&self, element_key: &str, title: &str) -> Option<IconReference> {
        let filename = self.labels.icon_filename(element_key)?;
        Some(self.icons.resolve(&filename, title))
    }
}

/// Deterministic CSS-safe id for a module name.
///
/// Client state keyed on these ids (menu highlighting) has to survive
/// reloads, so the id is a stable digest of the name rather than a counter.
pub fn css_id(name: &str) -> String {
    let digest = hex::encode(Sha256::digest(name.as_bytes()));
    // 28 bits of the digest, rendered decimal.
    let short = u32::from_str_radix(&digest[..7], 16).unwrap_or(0);
    format!("ID_{short}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::labels::ModuleLabels;
    use crate::registry::{ModuleDescriptor, SubmoduleDescriptor};

    fn module(key: &str, script: Option<&str>) -> ModuleDescriptor {
        ModuleDescriptor {
            key: key.to_string(),
            title: format!("{key} title"),
            script: script.map(str::to_string),
            nav_frame_script: None,
            nav_frame_script_param: None,
            sub: Vec::new(),
        }
    }

    fn submodule(key: &str, script: &str) -> SubmoduleDescriptor {
        SubmoduleDescriptor {
            key: key.to_string(),
            title: format!("{key} title"),
            description: format!("{key} description"),
            script: Some(script.to_string()),
            nav_frame_script: None,
            nav_frame_script_param: None,
        }
    }

    fn build(
        registry: &ModuleRegistry,
        user: &UserContext,
        labels: &ModuleLabels,
        back_path: &str,
    ) -> ModuleTree {
        let icons = IconResolver::new(back_path, ".");
        ModuleTreeBuilder::new(registry, user, labels, &icons, back_path).build()
    }

    #[test]
    fn test_css_id_is_deterministic() {
        assert_eq!(css_id("web"), css_id("web"));
        assert_ne!(css_id("web"), css_id("file"));
        assert!(css_id("web").starts_with("ID_"));
        assert!(css_id("web")[3..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_tree_preserves_registry_order() {
        let registry = ModuleRegistry::from_descriptors(vec![
            module("web", None),
            module("file", Some("file_list.php")),
            module("user", Some("user_task.php")),
        ]);
        let tree = build(&registry, &UserContext::default(), &ModuleLabels::new(), "");

        let names: Vec<&str> = tree.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["web", "file", "user"]);
        assert!(tree.get("file_tab").is_some());
        assert!(tree.get("missing_tab").is_none());
    }

    #[test]
    fn test_doc_module_hidden_by_user_context() {
        let registry = ModuleRegistry::from_descriptors(vec![
            module("web", None),
            module("doc", Some("doc.php")),
            module("user", None),
        ]);
        let user = UserContext {
            hide_doc_module: true,
            ..UserContext::default()
        };
        let tree = build(&registry, &user, &ModuleLabels::new(), "");

        let names: Vec<&str> = tree.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["web", "user"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_module_with_submodules_is_a_grouping_node() {
        let mut web = module("web", Some("ignored.php"));
        web.sub = vec![submodule("list", "list.php")];
        let registry = ModuleRegistry::from_descriptors(vec![web]);
        let tree = build(&registry, &UserContext::default(), &ModuleLabels::new(), "");

        let node = tree.get("web_tab").unwrap();
        assert_eq!(node.link, "");
        assert_eq!(node.original_link, "");
        assert_eq!(node.subitems.len(), 1);
    }

    #[test]
    fn test_submodule_nodes_compose_names_and_links() {
        let mut web = module("web", None);
        web.sub = vec![submodule("list", "list.php")];
        let registry = ModuleRegistry::from_descriptors(vec![web]);
        let tree = build(&registry, &UserContext::default(), &ModuleLabels::new(), "../");

        let node = tree.get("web_tab").unwrap();
        let sub = &node.subitems[0];
        assert_eq!(sub.name, "web_list");
        assert_eq!(sub.element_key, "web_list_tab");
        assert_eq!(sub.on_click, "top.goToModule('web_list');");
        assert_eq!(sub.link, "../list.php");
        assert_eq!(sub.original_link, "../list.php");
        assert_eq!(sub.prefix, "");
        assert!(sub.nav_target.is_none());
        assert!(sub.parent_nav_frame_script.is_none());
    }

    #[test]
    fn test_frame_prefix_wraps_submodule_link() {
        let mut web = module("web", None);
        web.nav_frame_script = Some("alt_db_navframe.php".to_string());
        web.sub = vec![submodule("list", "list.php")];
        let registry = ModuleRegistry::from_descriptors(vec![web]);
        let user = UserContext {
            condensed_mode: true,
            ..UserContext::default()
        };
        let tree = build(&registry, &user, &ModuleLabels::new(), "");

        let sub = &tree.get("web_tab").unwrap().subitems[0];
        assert_eq!(sub.prefix, "alt_db_navframe.php?&currentSubScript=");
        assert_eq!(sub.link, "alt_db_navframe.php?&currentSubScript=list.php");
        assert_eq!(sub.original_link, "list.php");
        assert_eq!(sub.nav_target.as_deref(), Some("alt_db_navframe.php?"));
        assert_eq!(
            sub.parent_nav_frame_script.as_deref(),
            Some("alt_db_navframe.php")
        );
    }

    #[test]
    fn test_single_destination_module_with_frame_prefix() {
        let mut file = module("file", Some("file_list.php"));
        file.nav_frame_script = Some("alt_file_navframe.php".to_string());
        let registry = ModuleRegistry::from_descriptors(vec![file]);
        let user = UserContext {
            condensed_mode: true,
            ..UserContext::default()
        };
        let tree = build(&registry, &user, &ModuleLabels::new(), "");

        let node = tree.get("file_tab").unwrap();
        assert_eq!(
            node.link,
            "alt_file_navframe.php?&currentSubScript=file_list.php"
        );
        assert_eq!(node.original_link, "file_list.php");
    }

    #[test]
    fn test_labels_override_descriptor_titles() {
        let mut web = module("web", None);
        web.sub = vec![submodule("list", "list.php")];
        let registry = ModuleRegistry::from_descriptors(vec![web]);
        let labels = ModuleLabels::new()
            .title("web_tab", "Web")
            .title("web_list_tab", "List")
            .description("web_list_tab", "Record listing");
        let tree = build(&registry, &UserContext::default(), &labels, "");

        let node = tree.get("web_tab").unwrap();
        assert_eq!(node.title, "Web");
        assert_eq!(node.subitems[0].title, "List");
        assert_eq!(node.subitems[0].description, "Record listing");
    }

    #[test]
    fn test_descriptor_titles_used_when_labels_missing() {
        let registry = ModuleRegistry::from_descriptors(vec![module("web", None)]);
        let tree = build(&registry, &UserContext::default(), &ModuleLabels::new(), "");
        assert_eq!(tree.get("web_tab").unwrap().title, "web title");
    }

    #[test]
    fn test_icon_resolved_only_when_registered() {
        let registry = ModuleRegistry::from_descriptors(vec![module("web", None)]);
        let labels = ModuleLabels::new().icon("web_tab", "gfx/module_web.gif");
        let tree = build(&registry, &UserContext::default(), &labels, "../");

        let node = tree.get("web_tab").unwrap();
        let icon = node.icon.as_ref().unwrap();
        assert_eq!(icon.path, "../gfx/module_web.gif");

        let without = build(&registry, &UserContext::default(), &ModuleLabels::new(), "../");
        assert!(without.get("web_tab").unwrap().icon.is_none());
    }

    #[test]
    fn test_frame_state_script_seeds_framed_modules() {
        let mut web = module("web", None);
        web.nav_frame_script = Some("alt_db_navframe.php".to_string());
        web.sub = vec![submodule("list", "list.php")];
        let registry =
            ModuleRegistry::from_descriptors(vec![web, module("user", Some("user_task.php"))]);
        let user = UserContext {
            condensed_mode: true,
            ..UserContext::default()
        };
        let tree = build(&registry, &user, &ModuleLabels::new(), "");

        assert_eq!(
            tree.frame_state_script(),
            "top.fsMod.recentIds[\"web\"] = \"\";\n"
        );
    }

    #[test]
    fn test_frame_state_script_empty_without_frames() {
        let registry = ModuleRegistry::from_descriptors(vec![module("user", None)]);
        let tree = build(&registry, &UserContext::default(), &ModuleLabels::new(), "");
        assert_eq!(tree.frame_state_script(), "");
    }
}
