//! Log subscriber setup.

use std::{fs::File, path::Path, sync::Mutex};

use color_eyre::eyre::{eyre, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a plain-text subscriber writing to `log_file`.
///
/// The terminal is owned by the UI, so without a log file no subscriber is installed and every
/// event is dropped. The level filter is read from `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// # Errors
///
/// This function returns an error if the log file cannot be created or a global subscriber is
/// already installed.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))
}
