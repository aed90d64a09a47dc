//! offerview - Offer Preview
//!
//! Terminal UI for previewing in-game offers under each layout mode.

mod app;
mod color;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use offerview_core::{Catalog, Config, LayoutMode};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::App;

#[derive(Parser)]
#[command(name = "offerview")]
#[command(about = "Preview offer layouts in the terminal")]
#[command(version)]
struct Args {
    /// Catalog file (defaults to the configured catalog)
    catalog: Option<PathBuf>,

    /// Layout mode: vertical, horizontal, single_focus, tri_focus
    #[arg(short, long)]
    mode: Option<LayoutMode>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;

    // Initialize logging (to file, not stdout since we have a TUI)
    let _log_guard =
        offerview_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("offerview TUI starting up");

    let catalog_path = config.resolve_catalog_path(args.catalog.as_deref());
    let catalog = Catalog::load(&catalog_path)
        .with_context(|| format!("failed to load catalog {}", catalog_path.display()))?;

    let mut app = App::new(
        &catalog,
        catalog_path,
        config.preview.default_mode,
        config.design,
    )
    .with_mode_override(args.mode);

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    tracing::info!("offerview TUI shutting down");

    result
}

/// Run the main application loop.
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Render
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
