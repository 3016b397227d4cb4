//! Logging setup for the CLI.
//!
//! Human-readable logs go to stderr at the level selected by the verbosity
//! flags; an optional structured JSON sink mirrors everything at debug level
//! to a log file.

use std::fs::File;
use std::path::Path;

use anyhow::Context;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` overrides the verbosity flags when set. The returned guard must
/// stay alive for the duration of the program so buffered file logs flush on
/// exit.
pub(crate) fn init(
    verbosity: &Verbosity<InfoLevel>,
    log_file: Option<&Path>,
) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.tracing_level_filter().to_string()));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let file_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(EnvFilter::new("debug"));

            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(file_layer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry().with(stderr_layer).init();
            Ok(None)
        }
    }
}
