mod app;
mod config;
mod drag;
mod form;
mod input;
mod jobs;
mod logging;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use config::{ConfigError, UiConfig};
use jobs::store::JobStore;
use jobs::{JobStatus, NewJob};

#[derive(Parser)]
#[command(name = "jobdeck", about = "A kanban board for tracking job applications")]
struct Cli {
    /// Use Nerd Font glyphs instead of ASCII icons
    #[arg(long, visible_alias = "nf")]
    nerd_font: bool,

    /// Config file (default: <config dir>/jobdeck/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Start with a few sample applications
    #[arg(long)]
    demo: bool,
}

fn main() {
    // Install color_eyre for unexpected panics/errors (developer bugs).
    let _ = color_eyre::install();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        print_user_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> color_eyre::Result<()> {
    let mut config = config::resolve_config(cli.config.as_deref())?;
    if cli.nerd_font {
        config.ui.nerd_font = true;
    }

    let log_file = cli.log_file.or(config.log.file);
    logging::init(log_file.as_deref(), &config.log.filter)?;

    let mut store = JobStore::new();
    if cli.demo {
        seed_demo(&mut store);
    }

    cmd_tui(&mut store, config.ui)
}

/// Print a user-friendly error message, with actionable hints for known error types.
fn print_user_error(error: &color_eyre::Report) {
    if let Some(config_err) = error.downcast_ref::<ConfigError>() {
        match config_err {
            ConfigError::Io { path, source } => {
                eprintln!("error: cannot read config file {}.", path.display());
                eprintln!("  {source}");
                eprintln!("  Check the --config path or remove the flag to use defaults.");
            }
            ConfigError::Parse { path, source } => {
                eprintln!("error: config file {} is not valid.", path.display());
                eprintln!("  {source}");
            }
        }
        return;
    }

    eprintln!("error: {error:#}");
}

fn cmd_tui(store: &mut JobStore, ui: UiConfig) -> color_eyre::Result<()> {
    let mut terminal = ratatui::init();
    let result = execute!(std::io::stdout(), EnableMouseCapture)
        .wrap_err("cannot enable mouse capture")
        .and_then(|()| app::run(&mut terminal, store, ui));
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

/// Sample applications spread across the pipeline.
fn seed_demo(store: &mut JobStore) {
    let samples = [
        ("Acme Corp", "Backend Engineer", "Remote", JobStatus::Wishlist, Some("$120k - $140k")),
        ("Globex", "Platform Engineer", "Berlin", JobStatus::Applied, None),
        ("Initech", "Rust Developer", "Austin, TX", JobStatus::Interview, Some("$135k")),
        ("Umbrella", "Site Reliability Engineer", "London", JobStatus::Applied, None),
        ("Hooli", "Systems Engineer", "Mountain View, CA", JobStatus::Offer, Some("$160k")),
        ("Vandelay Industries", "Data Engineer", "New York, NY", JobStatus::Rejected, None),
    ];
    for (company, position, location, status, salary) in samples {
        store.add_job(NewJob {
            status,
            salary: salary.map(str::to_string),
            ..NewJob::new(company, position, location)
        });
    }
    tracing::debug!(jobs = store.len(), "demo data seeded");
}
