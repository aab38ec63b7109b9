//! Module registry hand-off.
//!
//! Discovery and permission filtering live with the module loader; the menu
//! receives its result as an ordered list of descriptors, usually serialized
//! as a JSON array. Registry order is authoritative for rendering, so the
//! registry preserves it exactly.

use serde::{Deserialize, Serialize};

use crate::error::MenuResult;

/// A main module entry from the loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Module key, unique within the registry (e.g. `web`).
    pub key: String,

    /// Default display title; a label resolver entry overrides it.
    #[serde(default)]
    pub title: String,

    /// Direct script link, honored only for modules without submodules.
    #[serde(default)]
    pub script: Option<String>,

    /// Navigation frame script, inherited by submodules unless overridden.
    #[serde(default)]
    pub nav_frame_script: Option<String>,

    /// Extra query parameters for the navigation frame script.
    #[serde(default)]
    pub nav_frame_script_param: Option<String>,

    /// Ordered submodules. A module with submodules is a grouping node.
    #[serde(default)]
    pub sub: Vec<SubmoduleDescriptor>,
}

/// A submodule entry nested under a main module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmoduleDescriptor {
    /// Submodule key, unique within the parent (e.g. `list`).
    pub key: String,

    /// Default display title; a label resolver entry overrides it.
    #[serde(default)]
    pub title: String,

    /// Default description; a label resolver entry overrides it.
    #[serde(default)]
    pub description: String,

    /// Script link loaded into the content area.
    #[serde(default)]
    pub script: Option<String>,

    /// Navigation frame script overriding the parent's.
    #[serde(default)]
    pub nav_frame_script: Option<String>,

    /// Navigation frame parameters overriding the parent's.
    #[serde(default)]
    pub nav_frame_script_param: Option<String>,
}

/// Ordered registry of loaded modules.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: Vec<ModuleDescriptor>,
}

impl ModuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from descriptors, preserving their order.
    pub fn from_descriptors(modules: Vec<ModuleDescriptor>) -> Self {
        Self { modules }
    }

    /// Parse the loader's JSON hand-off (an array of module descriptors).
    pub fn from_json(json: &str) -> MenuResult<Self> {
        let modules: Vec<ModuleDescriptor> = serde_json::from_str(json)?;
        Ok(Self { modules })
    }

    /// Register a descriptor. An existing entry with the same key is
    /// replaced in place, keeping its position.
    pub fn register(&mut self, module: ModuleDescriptor) {
        if let Some(existing) = self.modules.iter_mut().find(|m| m.key == module.key) {
            *existing = module;
        } else {
            self.modules.push(module);
        }
    }

    /// Remove a module by key, returning it. Missing keys are a no-op.
    pub fn remove(&mut self, key: &str) -> Option<ModuleDescriptor> {
        let index = self.modules.iter().position(|m| m.key == key)?;
        Some(self.modules.remove(index))
    }

    /// Look up a module by key.
    pub fn get(&self, key: &str) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|m| m.key == key)
    }

    /// Iterate modules in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.iter()
    }

    /// Module keys in registry order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|m| m.key.as_str())
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
