use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use color_eyre::eyre::WrapErr;
use tracing_subscriber::EnvFilter;

/// Install a file-backed `tracing` subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Without a path nothing is installed
/// and all events are discarded.
pub fn init(path: Option<&Path>, default_filter: &str) -> color_eyre::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(env.as_deref(), default_filter)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| color_eyre::eyre::eyre!("cannot install log subscriber: {e}"))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "jobdeck starting");
    Ok(())
}

/// A usable `env` directive wins; otherwise `default_filter` must parse.
fn build_filter(env: Option<&str>, default_filter: &str) -> color_eyre::Result<EnvFilter> {
    if let Some(filter) = env.and_then(|d| EnvFilter::try_new(d).ok()) {
        return Ok(filter);
    }
    EnvFilter::try_new(default_filter).wrap_err_with(|| format!("invalid log filter {default_filter:?}"))
}
