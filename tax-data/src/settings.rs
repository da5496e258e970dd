//! TOML settings for the engine and its front end.
//!
//! ```toml
//! log_level = "debug"
//! brackets = "brackets.csv"   # relative to this file
//!
//! [supplemental]              # omitted keys keep their defaults
//! luxury_spending_rate = 0.30
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tax_core::calculations::SupplementalRatesError;
use tax_core::{BracketSchedule, SupplementalRates, TaxEngine};
use thiserror::Error;
use tracing::debug;

use crate::loader::{BracketLoadError, BracketTableLoader};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Brackets(#[from] BracketLoadError),

    #[error("invalid supplemental rates: {0}")]
    Rates(#[from] SupplementalRatesError),
}

/// Settings read at process start. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// `EnvFilter` directive for the front end's logger.
    pub log_level: Option<String>,

    /// Bracket table CSV. Relative paths are resolved against the settings
    /// file's directory by [`Settings::load`].
    pub brackets: Option<PathBuf>,

    pub supplemental: SupplementalRates,
}

impl Settings {
    /// Parses settings from TOML text. Relative paths are left as written.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads and parses a settings file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut settings = Self::from_toml_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let (Some(brackets), Some(dir)) = (&settings.brackets, path.parent()) {
            if brackets.is_relative() {
                settings.brackets = Some(dir.join(brackets));
            }
        }

        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Loads the configured bracket table, or the standard one if none is set.
    pub fn schedule(&self) -> Result<BracketSchedule, BracketLoadError> {
        match &self.brackets {
            Some(path) => BracketTableLoader::load_from_file(path),
            None => Ok(BracketSchedule::standard()),
        }
    }

    /// Builds the engine these settings describe.
    pub fn build_engine(&self) -> Result<TaxEngine, SettingsError> {
        let schedule = self.schedule()?;
        Ok(TaxEngine::new(schedule, self.supplemental.clone())?)
    }
}
