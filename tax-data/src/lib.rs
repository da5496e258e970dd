//! Loading of the engine's immutable configuration: bracket tables from CSV
//! and settings from TOML.

pub mod loader;
pub mod settings;

pub use loader::{BracketLoadError, BracketRecord, BracketTableLoader};
pub use settings::{Settings, SettingsError};
