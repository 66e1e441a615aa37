use color_eyre::Result;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, LoggingConfig};

pub const LOG_FILE_NAME: &str = "scriptdesk.log";

/// Routes `tracing` output to a log file so it never draws over the TUI.
///
/// `RUST_LOG` wins over the configured level. Returns the log file path.
pub fn init(config: &LoggingConfig) -> Result<PathBuf> {
    let log_path = Config::data_dir()?.join(LOG_FILE_NAME);
    init_at(&log_path, &config.level)?;
    Ok(log_path)
}

fn init_at(log_path: &Path, level: &str) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_path)?;

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("scriptdesk v{} starting", env!("CARGO_PKG_VERSION"));
    Ok(())
}
