//! Quadro CMS backend module menu.
//!
//! Builds the administration interface's module navigation from the loader's
//! registry hand-off: a normalized module/submodule tree, the nested menu
//! markup, the client-side `goToModule` dispatch routine, and the cache
//! action list.

pub mod cache_actions;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod frame;
pub mod helpers;
pub mod icon;
pub mod labels;
pub mod menu;
pub mod paths;
pub mod registry;
pub mod render;
pub mod tree;
pub mod user;
