//! Module menu preview tool.
//!
//! Renders the menu markup, frame-state seeds, dispatch routine, and cache
//! actions for a registry hand-off JSON file, with flags standing in for a
//! real session.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use quadro_menu::config::MenuConfig;
use quadro_menu::labels::ModuleLabels;
use quadro_menu::menu::ModuleMenu;
use quadro_menu::registry::ModuleRegistry;
use quadro_menu::user::UserContext;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the registry hand-off JSON (an array of module descriptors).
    #[arg(long, default_value = "modules.json")]
    registry: PathBuf,

    /// Use condensed frame routing instead of the classic frameset.
    #[arg(long)]
    condensed: bool,

    /// Disable activation controls and dispatch cases.
    #[arg(long)]
    no_links: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();

    let config = MenuConfig::from_env().context("failed to load configuration")?;
    let json = fs::read_to_string(&args.registry).with_context(|| {
        format!(
            "failed to read registry hand-off: {}",
            args.registry.display()
        )
    })?;
    let registry = ModuleRegistry::from_json(&json).context("failed to parse registry hand-off")?;

    info!(modules = registry.len(), "registry hand-off loaded");

    let user = UserContext {
        condensed_mode: args.condensed,
        ..UserContext::default()
    };
    let labels = ModuleLabels::new();

    let mut menu = ModuleMenu::new(registry, &user, &labels, &config);
    menu.set_link_modules(!args.no_links);

    println!("<!-- menu -->");
    println!("{}", menu.render());
    println!("// frame state seeds");
    println!("{}", menu.tree().frame_state_script());
    println!("// dispatch routine");
    println!("{}", menu.dispatch_script());
    println!("<!-- cache actions -->");
    println!("{}", menu.render_cache_actions());

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
