//! Log setup for the `slab-tax` binary.
//!
//! The subscriber is installed once, after settings are resolved: stderr
//! always, plus an append-mode file when one is configured. The report goes
//! to stdout, so piping it stays clean.

use std::{
    fs::File,
    io::{self, IsTerminal},
    path::PathBuf,
    sync::Mutex,
};

use anyhow::{Context, Result};
use chrono::Local;
use tax_data::Settings;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::Writer, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::cli::Cli;

const DEFAULT_FILTER: &str = "info";

/// Local wall-clock time, millisecond precision.
#[derive(Debug, Clone, Copy)]
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(
        &self,
        w: &mut Writer<'_>,
    ) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Verbosity and destinations for log output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive. When unset, `RUST_LOG` applies, then `info`.
    pub level: Option<String>,

    /// File appended to alongside stderr.
    pub file: Option<PathBuf>,
}

impl LogConfig {
    /// Takes the level from `settings`, which already carries any
    /// `--log-level` override, and the file from `--log-file`.
    pub fn resolve(
        cli: &Cli,
        settings: &Settings,
    ) -> Self {
        Self {
            level: settings.log_level.clone(),
            file: cli.log_file.clone(),
        }
    }

    fn filter(&self) -> Result<EnvFilter> {
        match &self.level {
            Some(directive) => EnvFilter::try_new(directive)
                .with_context(|| format!("invalid log level '{directive}'")),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
        }
    }
}

/// Installs the global subscriber described by `config`.
///
/// Stderr output is coloured only when attached to a terminal.
pub fn init(config: &LogConfig) -> Result<()> {
    let filter = config.filter()?;

    let stderr_layer = fmt::layer()
        .compact()
        .with_timer(LocalTime)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = match &config.file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            Some(
                fmt::layer()
                    .compact()
                    .with_timer(LocalTime)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging is already initialized")
}
