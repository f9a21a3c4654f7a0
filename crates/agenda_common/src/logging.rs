//! Logging utilities for the Agenda service.
//!
//! Every crate logs through `tracing`; the binary calls one of the init
//! functions here once at startup.

use agenda_config::LoggingConfig;
use std::str::FromStr;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO level.
///
/// # Examples
///
/// ```
/// use agenda_common::logging;
///
/// logging::init();
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` directives are honoured in addition to `level`, which applies to
/// the agenda crates and to the HTTP trace layer.
pub fn init_with_level(level: Level) {
    // Use try_init to handle the case where a global default subscriber has already been set
    let result = tracing_subscriber::registry()
        .with(stdout_layer())
        .with(filter_for(level))
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Initialize logging from the `[logging]` config section.
///
/// When `file_dir` is set, a daily rolling file is written next to stdout.
/// The returned guard flushes the file writer and must be kept alive for the
/// lifetime of the process.
pub fn init_from_config(config: &LoggingConfig) -> Option<WorkerGuard> {
    let level = Level::from_str(&config.level).unwrap_or(Level::INFO);

    let Some(dir) = config.file_dir.as_deref() else {
        init_with_level(level);
        return None;
    };

    let appender = tracing_appender::rolling::daily(dir, "agenda.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let result = tracing_subscriber::registry()
        .with(stdout_layer())
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .with(filter_for(level))
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {} (file output in {})", level, dir);
    }
    Some(guard)
}

fn stdout_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
}

fn filter_for(level: Level) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();
    for target in ["agenda", "tower_http"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    tracing::error!("{}: {}", context, error);
}
