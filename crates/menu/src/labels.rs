//! Label and icon lookup for module element keys.
//!
//! Translations and icon registrations live with the administration shell;
//! the menu consults them through [`LabelResolver`]. Missing entries degrade
//! to the descriptor's own title or to nothing at all, so the menu renders
//! with gaps rather than failing.

use std::collections::HashMap;

/// Resolves display labels and icon filenames for module element keys.
pub trait LabelResolver {
    /// Title for a module or submodule element key (e.g. `web_tab`).
    fn module_title(&self, element_key: &str) -> Option<String>;

    /// Description text for a submodule element key.
    fn module_description(&self, element_key: &str) -> Option<String>;

    /// Icon filename registered for an element key.
    fn icon_filename(&self, element_key: &str) -> Option<String>;

    /// Label for an interface button key (e.g. `buttons.logout`).
    fn button_label(&self, key: &str) -> Option<String>;
}

/// Map-backed label resolver.
#[derive(Debug, Clone, Default)]
pub struct ModuleLabels {
    titles: HashMap<String, String>,
    descriptions: HashMap<String, String>,
    icons: HashMap<String, String>,
    buttons: HashMap<String, String>,
}

impl ModuleLabels {
    /// Create an empty label set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a title for an element key.
    pub fn title(mut self, key: impl Into<String>, title: impl Into<String>) -> Self {
        self.titles.insert(key.into(), title.into());
        self
    }

    /// Register a description for an element key.
    pub fn description(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.descriptions.insert(key.into(), text.into());
        self
    }

    /// Register an icon filename for an element key.
    pub fn icon(mut self, key: impl Into<String>, filename: impl Into<String>) -> Self {
        self.icons.insert(key.into(), filename.into());
        self
    }

    /// Register an interface button label.
    pub fn button(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.buttons.insert(key.into(), label.into());
        self
    }
}

impl LabelResolver for ModuleLabels {
    fn module_title(&self, element_key: &str) -> Option<String> {
        self.titles.get(element_key).cloned()
    }

    fn module_description(&self, element_key: &str) -> Option<String> {
        self.descriptions.get(element_key).cloned()
    }

    fn icon_filename(&self, element_key: &str) -> Option<String> {
        self.icons.get(element_key).cloned()
    }

    fn button_label(&self, key: &str) -> Option<String> {
        self.buttons.get(key).cloned()
    }
}
