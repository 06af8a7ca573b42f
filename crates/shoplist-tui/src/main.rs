//! Shoplist - a shopping list for the terminal
//!
//! Built with Ratatui and crossterm.

mod app;
mod config;
mod handlers;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use shoplist_core::{FileStorage, ListStore, Session, Storage};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;
use url::Url;

use app::{App, AppState};
use config::{Config, ConfigSource};

/// Shoplist - organise, check off and share a shopping list
#[derive(Parser, Debug)]
#[command(name = "shoplist")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the list (overrides config)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Location to start from; a shared list in it replaces the stored one
    #[arg(short, long, value_name = "URL")]
    open: Option<Url>,

    /// Print a share link for the stored list and exit
    #[arg(long)]
    share: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (mut config, source) = Config::load(args.config)?;
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    init_logging(&config, args.share)?;
    match source {
        ConfigSource::Created(path) => tracing::info!("Created default config: {}", path.display()),
        ConfigSource::Loaded(path) => tracing::info!("Loaded config from {}", path.display()),
    }

    let storage = FileStorage::new(&config.data_dir);
    tracing::info!("Starting shoplist with data dir {}", storage.dir().display());
    let mut session = Session::open(ListStore::with_key(storage, config.storage_key.clone()));

    let mut location = Url::parse(&config.share_base_url)
        .with_context(|| format!("Invalid share_base_url: {}", config.share_base_url))?;
    let mut imported = None;

    if let Some(open) = args.open {
        location = match session.import_shared(&open) {
            Some(stripped) => {
                tracing::info!("Location after import: {}", stripped);
                imported = Some(session.items().len());
                stripped
            }
            None => open,
        };
    }

    if args.share {
        if session.items().is_empty() {
            anyhow::bail!("The shopping list is empty, nothing to share");
        }
        println!("{}", session.share_url(&location));
        return Ok(());
    }

    let mut app = App::new(session, location, config.default_filter);
    if let Some(count) = imported {
        app.status = Some(format!("Loaded {count} items from shared link"));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    if let Some(link) = app.copied_link {
        println!("{link}");
    }

    Ok(())
}

/// Log to stderr for one-shot commands, to a file in the data dir otherwise
/// so output does not land on the alternate screen.
fn init_logging(config: &Config, to_stderr: bool) -> Result<()> {
    let writer = if to_stderr {
        BoxMakeWriter::new(io::stderr)
    } else {
        std::fs::create_dir_all(&config.data_dir).with_context(|| {
            format!("Failed to create data directory: {}", config.data_dir.display())
        })?;
        let log_path = config.data_dir.join("shoplist.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;
        BoxMakeWriter::new(std::sync::Mutex::new(file))
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("shoplist=info".parse()?)
                .add_directive("shoplist_core=info".parse()?),
        )
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(())
}

fn run_app<B: Backend, S: Storage>(terminal: &mut Terminal<B>, app: &mut App<S>) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                // Ignore release/repeat events reported by some terminals
                if key.kind == KeyEventKind::Press && handlers::handle_key(app, key) {
                    break;
                }
            }
        }

        if matches!(app.state, AppState::Quit) {
            break;
        }
    }

    Ok(())
}
