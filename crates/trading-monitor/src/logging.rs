//! Logging setup.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer, Registry};

/// Log file name prefix inside the log directory.
pub const LOG_FILE_PREFIX: &str = "signal-watch.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy)]
pub struct LogOptions<'a> {
    /// Default filter directive; `RUST_LOG` overrides it
    pub level: &'a str,
    /// JSON console output instead of pretty
    pub json: bool,
    /// Write to stdout. Off while the dashboard owns the terminal.
    pub console: bool,
    /// Directory for daily-rotated log files
    pub file_dir: Option<&'a Path>,
}

/// Install the global subscriber.
///
/// Returns the file writer guard when file logging is on; dropping it stops
/// flushing, so the caller keeps it alive until exit.
pub fn setup_logging(options: LogOptions<'_>) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(options.level));

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if options.console {
        if options.json {
            layers.push(fmt::layer().json().boxed());
        } else {
            layers.push(fmt::layer().pretty().boxed());
        }
    }

    let guard = options.file_dir.map(|dir| {
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let file_layer = fmt::layer().with_ansi(false).with_writer(writer);
        if options.json {
            layers.push(file_layer.json().boxed());
        } else {
            layers.push(file_layer.boxed());
        }
        guard
    });

    tracing_subscriber::registry().with(layers).with(filter).init();

    guard
}
