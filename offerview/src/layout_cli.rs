//! offerview-layout - print computed offer layouts as JSON
//!
//! Loads a catalog, previews one offer under the chosen layout mode and
//! prints the slot placements (or the full visual tree with `--tree`).
//!
//! Uses XDG Base Directory specification for file locations:
//! - Catalog: $XDG_DATA_HOME/offerview/offers.json unless given explicitly
//! - Logs: $XDG_STATE_HOME/offerview/offerview.log
//! - Config: $XDG_CONFIG_HOME/offerview/config.toml

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use offerview_core::{Catalog, Config, Direction, LayoutMode, PreviewRenderer, SlotPlacement};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "offerview-layout")]
#[command(about = "Print computed offer layouts as JSON")]
#[command(version)]
struct Args {
    /// Catalog file (defaults to the configured catalog)
    catalog: Option<PathBuf>,

    /// Offer to lay out: config name, id, or zero-based position
    #[arg(short, long, default_value = "0")]
    offer: String,

    /// Layout mode: vertical, horizontal, single_focus, tri_focus
    /// (defaults to the offer's own type, then the configured mode)
    #[arg(short, long)]
    mode: Option<LayoutMode>,

    /// Focus index for carousel modes (wrapped into range)
    #[arg(short, long, default_value_t = 0)]
    focus: usize,

    /// Print the full visual tree instead of placements only
    #[arg(long)]
    tree: bool,
}

#[derive(Serialize)]
struct LayoutOutput<'a> {
    offer: &'a str,
    mode: &'a str,
    active_index: usize,
    placements: Vec<SlotPlacement>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Ensure XDG environment variables are set before using core library
    Config::ensure_xdg_env();

    let config = Config::load().context("failed to load configuration")?;

    let _log_guard =
        offerview_core::logging::init(&config.logging).context("failed to initialize logging")?;

    let catalog_path = config.resolve_catalog_path(args.catalog.as_deref());
    let catalog = Catalog::load(&catalog_path)
        .with_context(|| format!("failed to load catalog {}", catalog_path.display()))?;

    let record = catalog
        .find(&args.offer)
        .with_context(|| format!("no offer matching {:?}", args.offer))?;

    let mode = args
        .mode
        .or_else(|| record.layout_mode())
        .unwrap_or(config.preview.default_mode);
    let mut preview = PreviewRenderer::new(record.to_offer(), mode).with_base_design(config.design);

    // Walk to the requested focus the same way navigation would.
    let steps = if preview.slot_count() == 0 {
        0
    } else {
        args.focus % preview.slot_count()
    };
    for _ in 0..steps {
        preview.advance(Direction::Right);
    }

    tracing::info!(
        offer = %record.config_name,
        mode = %mode,
        active_index = preview.active_index(),
        "Computed layout"
    );

    let json = if args.tree {
        serde_json::to_string_pretty(&preview.render())?
    } else {
        serde_json::to_string_pretty(&LayoutOutput {
            offer: &record.config_name,
            mode: preview.strategy_name(),
            active_index: preview.active_index(),
            placements: preview.placements(),
        })?
    };

    println!("{}", json);
    Ok(())
}
