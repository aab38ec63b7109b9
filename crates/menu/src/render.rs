//! Menu markup rendering.
//!
//! Renders the normalized tree as a nested unordered list: one `li` per
//! module with a nested `ul` for its submodules, nothing deeper. Activation
//! controls are anchors whose `onclick` dispatches through the client-side
//! `goToModule` routine; unlinked entries render as plain labels.

use crate::helpers::html_escape;
use crate::tree::{ModuleTree, SubmoduleNode};
use crate::user::UserContext;

/// Renders the module tree for the administration shell.
pub struct MenuRenderer<'a> {
    user: &'a UserContext,
    link_modules: bool,
}

impl<'a> MenuRenderer<'a> {
    /// Create a renderer. `link_modules` globally toggles activation
    /// controls; entries still render as labels when it is off.
    pub fn new(user: &'a UserContext, link_modules: bool) -> Self {
        Self { user, link_modules }
    }

    /// Render the full menu in tree order.
    pub fn render(&self, tree: &ModuleTree) -> String {
        let mut menu = String::new();

        for node in tree.iter() {
            let mut label = html_escape(&node.title);
            if !node.link.is_empty() && self.link_modules {
                label = format!(
                    "<a href=\"#\" onclick=\"{}\">{label}</a>",
                    html_escape(&self.on_click(&node.on_click))
                );
            }

            let collapsed = if self.user.is_collapsed(&node.name) {
                " class=\"collapsed\""
            } else {
                ""
            };
            let icon = node.icon.as_ref().map_or("", |i| i.html.as_str());

            menu.push_str(&format!(
                "<li id=\"{}\"{collapsed}><div>{icon} {label}</div>",
                node.css_id
            ));
            if !node.subitems.is_empty() {
                menu.push_str(&self.render_submodules(&node.subitems));
            }
            menu.push_str("</li>\n");
        }

        format!("<ul id=\"module-menu\">\n{menu}</ul>\n")
    }

    /// Render a submodule list.
    pub fn render_submodules(&self, submodules: &[SubmoduleNode]) -> String {
        let mut list = String::new();

        for submodule in submodules {
            let icon = submodule.icon.as_ref().map_or("", |i| i.html.as_str());
            let title = html_escape(&submodule.title);

            let item = if !submodule.link.is_empty() && self.link_modules {
                format!(
                    "<a href=\"#\" onclick=\"{}\" title=\"{}\">{icon} <span>{title}</span></a>",
                    html_escape(&self.on_click(&submodule.on_click)),
                    html_escape(&submodule.description)
                )
            } else {
                format!("{icon} <span>{title}</span>")
            };

            list.push_str(&format!("<li id=\"{}\">{item}</li>\n", submodule.css_id));
        }

        format!("<ul>\n{list}</ul>\n")
    }

    /// Full onclick handler for an activation control.
    fn on_click(&self, dispatch: &str) -> String {
        let blur = if self.user.form_style_blur {
            "this.blur();"
        } else {
            ""
        };
        format!("{dispatch}{blur}return false;")
    }
}
