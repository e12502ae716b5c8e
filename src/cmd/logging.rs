use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::util::errors::AppError;

/// Installs the global `tracing` subscriber writing to `log_file`.
///
/// The file is truncated so each run starts with an empty log. An unparsable
/// `level` falls back to `debug`. Must be called at most once per process.
pub fn init_logging(log_file: &Path, level: &str) -> Result<(), AppError> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_file)
        .map_err(|e| AppError::LogFile(log_file.to_path_buf(), e))?;

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();

    Ok(())
}
