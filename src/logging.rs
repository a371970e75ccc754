//! Tracing subscriber setup shared by the binaries
//!
//! Diagnostics go to stderr so stdout stays free for the run summary. An
//! optional log file receives the same events without ANSI colors.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// How the binaries want their diagnostics
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions<'a> {
    /// Lower the default level to DEBUG
    pub verbose: bool,
    /// Emit JSON lines instead of human readable text
    pub json: bool,
    /// Additional log file
    pub file: Option<&'a Path>,
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default level. The returned guard must be kept
/// alive until exit so buffered file output is flushed.
pub fn init(options: LogOptions<'_>) -> io::Result<Option<WorkerGuard>> {
    let level = if options.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let (file_layer, guard) = match options.file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            (
                Some(fmt::layer().with_ansi(false).with_writer(non_blocking)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if options.json {
        subscriber
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        subscriber.with(fmt::layer().with_writer(io::stderr)).init();
    }

    Ok(guard)
}
