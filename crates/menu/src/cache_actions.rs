//! User-triggered cache clearing actions.
//!
//! The action list is fixed when the menu is assembled: the clear-all action
//! is always present, and the extension cache action joins it when that
//! cache is enabled. Each action renders as a link firing an asynchronous
//! request against the database action endpoint, with the icon swapped for a
//! spinner until the request settles.

use crate::config::MenuConfig;
use crate::helpers::html_escape;
use crate::labels::LabelResolver;
use crate::user::UserContext;

/// Endpoint receiving cache commands.
pub const CACHE_ACTION_SCRIPT: &str = "db_actions.php";

/// A single cache clearing action.
#[derive(Debug, Clone)]
pub struct CacheAction {
    /// Stable identifier used in element ids.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Target URL carrying the verification token and the cache command.
    pub href: String,

    /// Icon markup.
    pub icon: String,
}

/// Build the cache action list for a request.
pub fn build_cache_actions(
    config: &MenuConfig,
    user: &UserContext,
    labels: &dyn LabelResolver,
) -> Vec<CacheAction> {
    let mut actions = Vec::new();
    let back = &config.back_path;
    let token = &user.verification_token;

    if config.extension_cache {
        let title = labels
            .button_label("cache.clear_extension")
            .unwrap_or_else(|| "Clear extension cache".to_string());
        actions.push(CacheAction {
            id: "temp_cached".to_string(),
            href: format!("{back}{CACHE_ACTION_SCRIPT}?vC={token}&cacheCmd=temp_CACHED"),
            icon: action_icon(back, "gfx/clear_cache_files.gif", &title),
            title,
        });
    }

    let title = labels
        .button_label("cache.clear_all")
        .unwrap_or_else(|| "Clear all caches".to_string());
    actions.push(CacheAction {
        id: "all".to_string(),
        href: format!("{back}{CACHE_ACTION_SCRIPT}?vC={token}&cacheCmd=all"),
        icon: action_icon(back, "gfx/clear_all_cache.gif", &title),
        title,
    });

    actions
}

/// Render the action list with asynchronous triggers.
pub fn render_cache_actions(actions: &[CacheAction]) -> String {
    let mut rendered = vec![String::from("<ul id=\"cache-actions\">")];

    for action in actions {
        let trigger = format!(
            "var icon = document.querySelector('#cache-action-{} img'); \
             var origin = icon.src; \
             icon.src = 'gfx/spinner.gif'; \
             fetch('{}').finally(function() {{ icon.src = origin; }}); \
             return false;",
            action.id, action.href
        );
        rendered.push(format!(
            "<li id=\"cache-action-{}\"><a onclick=\"{}\" href=\"#{}\">{} {}</a></li>",
            action.id,
            html_escape(&trigger),
            html_escape(&action.href),
            action.icon,
            html_escape(&action.title)
        ));
    }

    rendered.push(String::from("</ul>"));
    rendered.join("\n")
}

/// Toolbar icon markup. Cache action icons ship at a fixed 21x18.
fn action_icon(back_path: &str, filename: &str, title: &str) -> String {
    format!(
        "<img src=\"{back_path}{filename}\" width=\"21\" height=\"18\" title=\"{}\" alt=\"\" />",
        html_escape(title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::ModuleLabels;

    fn token_user() -> UserContext {
        UserContext {
            verification_token: "4f2a".to_string(),
            ..UserContext::default()
        }
    }

    #[test]
    fn test_clear_all_is_always_present() {
        let actions =
            build_cache_actions(&MenuConfig::default(), &token_user(), &ModuleLabels::new());

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].id, "all");
        assert_eq!(actions[0].href, "db_actions.php?vC=4f2a&cacheCmd=all");
        assert_eq!(actions[0].title, "Clear all caches");
    }

    #[test]
    fn test_extension_cache_adds_action_first() {
        let config = MenuConfig {
            extension_cache: true,
            ..MenuConfig::default()
        };
        let actions = build_cache_actions(&config, &token_user(), &ModuleLabels::new());

        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].id, "temp_cached");
        assert!(actions[0].href.ends_with("&cacheCmd=temp_CACHED"));
        assert_eq!(actions[1].id, "all");
    }

    #[test]
    fn test_back_path_prefixes_href_and_icon() {
        let config = MenuConfig {
            back_path: "../".to_string(),
            ..MenuConfig::default()
        };
        let actions = build_cache_actions(&config, &token_user(), &ModuleLabels::new());

        assert_eq!(actions[0].href, "../db_actions.php?vC=4f2a&cacheCmd=all");
        assert!(actions[0].icon.contains("src=\"../gfx/clear_all_cache.gif\""));
        assert!(actions[0].icon.contains("width=\"21\" height=\"18\""));
    }

    #[test]
    fn test_labels_override_action_titles() {
        let labels = ModuleLabels::new().button("cache.clear_all", "Flush everything");
        let actions = build_cache_actions(&MenuConfig::default(), &token_user(), &labels);
        assert_eq!(actions[0].title, "Flush everything");
    }

    #[test]
    fn test_render_swaps_icon_until_request_settles() {
        let actions =
            build_cache_actions(&MenuConfig::default(), &token_user(), &ModuleLabels::new());
        let html = render_cache_actions(&actions);

        assert!(html.starts_with("<ul id=\"cache-actions\">"));
        assert!(html.contains("<li id=\"cache-action-all\">"));
        assert!(html.contains("icon.src = &#x27;gfx/spinner.gif&#x27;;"));
        assert!(html.contains(
            "fetch(&#x27;db_actions.php?vC=4f2a&amp;cacheCmd=all&#x27;).finally"
        ));
        assert!(html.contains("href=\"#db_actions.php?vC=4f2a&amp;cacheCmd=all\""));
        assert!(html.ends_with("</ul>"));
    }
}
