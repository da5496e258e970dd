use clap::Parser;
use tracing::{debug, info};

use tax_cli::{
    app,
    cli::Cli,
    logging::{self, LogConfig},
};

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = app::load_settings(&cli)?;
    logging::init(&LogConfig::resolve(&cli, &settings))?;
    debug!(?settings, "settings resolved");

    let engine = app::build_engine(&settings)?;
    info!(brackets = engine.schedule().len(), "engine ready");

    let report = app::run(&engine, &cli)?;
    print!("{report}");

    Ok(())
}
