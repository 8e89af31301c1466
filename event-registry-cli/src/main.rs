//! Event Registry CLI Application
//!
//! This is the console front end for the event-registry library.
//! It adds:
//! - Interactive menu (register, list, join, leave)
//! - Typed prompts that re-ask on bad input
//! - TOML configuration file
//! - One-shot listing mode for scripts

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use event_registry::{Event, EventStore, RegistryConfig, StatusFilter, Timestamp};
use std::io::{self, Write};
use std::path::PathBuf;

mod config;
mod menu;
mod prompt;
mod report;

use config::{AppConfig, DisplayConfig};
use menu::{local_now, App};
use prompt::Console;
use report::{write_events, RenderContext};

/// Event Registry - Register events and users, track attendance
#[derive(Parser, Debug)]
#[command(name = "event-registry")]
#[command(about = "Register events and users and track who attends what", long_about = None)]
#[command(version)]
struct Args {
    /// Events file (overrides [storage] events_file; default: events.data)
    #[arg(short, long, value_name = "FILE")]
    data_file: Option<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print one listing and exit instead of starting the menu
    #[arg(short, long, value_enum, value_name = "VIEW")]
    list: Option<ListView>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ListView {
    All,
    Upcoming,
    Passed,
    Active,
    Nearby,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Event Registry CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using registry library v{}", event_registry::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };
    let registry_config = app_config.registry_config(args.data_file.as_deref())?;
    log::debug!("Registry configuration: {:?}", registry_config);

    let store = EventStore::from_config(&registry_config).with_context(|| {
        format!("Failed to load events from {:?}", registry_config.events_path)
    })?;

    match args.list {
        Some(view) => list_mode(&store, &registry_config, view),
        None => interactive_mode(store, registry_config, app_config.display),
    }
}

/// Interactive menu on stdin/stdout
fn interactive_mode(
    store: EventStore,
    config: RegistryConfig,
    display: DisplayConfig,
) -> Result<()> {
    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout());
    let mut app = App::new(console, store, config, display);
    app.run()
}

/// One-shot listing mode - print a single view and exit
fn list_mode(store: &EventStore, config: &RegistryConfig, view: ListView) -> Result<()> {
    let now = local_now();
    let ctx = RenderContext {
        now,
        config,
        user: None,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let (events, empty): (Vec<&Event>, &str) = match view {
        ListView::All => (store.events().iter().collect(), "No events registered"),
        ListView::Upcoming => (
            filtered(store, StatusFilter::upcoming(), now, config),
            "No upcoming events",
        ),
        ListView::Passed => (
            filtered(store, StatusFilter::passed(), now, config),
            "No passed events",
        ),
        ListView::Active => (
            filtered(store, StatusFilter::active(), now, config),
            "No active events",
        ),
        ListView::Nearby => (store.nearby(now, config), "No nearby events"),
    };

    write_events(&mut out, &events, empty, &ctx)?;
    out.flush()?;
    Ok(())
}

fn filtered<'a>(
    store: &'a EventStore,
    filter: StatusFilter,
    now: Timestamp,
    config: &RegistryConfig,
) -> Vec<&'a Event> {
    store
        .listing(&filter, now, config)
        .filtered
        .unwrap_or_default()
}

/// Initialize logging based on verbosity level
///
/// Defaults to warnings only so log lines do not interleave with the menu.
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
