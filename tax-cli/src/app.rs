use anyhow::{Context, Result};
use tax_core::TaxEngine;
use tax_data::Settings;
use tracing::debug;

use crate::cli::Cli;
use crate::report::Report;

/// Settings from `--config` (or defaults), with command-line overrides
/// applied.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?,
        None => Settings::default(),
    };

    if let Some(brackets) = &cli.brackets {
        settings.brackets = Some(brackets.clone());
    }
    if let Some(level) = &cli.log_level {
        settings.log_level = Some(level.clone());
    }
    Ok(settings)
}

/// Builds the engine once, before any computation.
pub fn build_engine(settings: &Settings) -> Result<TaxEngine> {
    settings
        .build_engine()
        .context("Failed to configure the tax engine")
}

/// Computes the tax described by `cli` and renders the report.
///
/// An invalid input yields an error and no report.
pub fn run(
    engine: &TaxEngine,
    cli: &Cli,
) -> Result<String> {
    let input = cli.tax_input();
    debug!(?input, "computing tax");

    let result = engine
        .compute(&input)
        .context("No computation available")?;

    Ok(Report::new(&result).to_string())
}
