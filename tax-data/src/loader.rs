//! CSV loader for bracket tables.
//!
//! ## CSV Format
//!
//! | Column        | Required | Type    | Notes                                  |
//! |---------------|----------|---------|----------------------------------------|
//! | `lower_bound` | yes      | decimal | first row must be `0`                  |
//! | `upper_bound` | yes      | decimal | leave the cell empty for "no limit"    |
//! | `rate`        | yes      | decimal | fraction, e.g. `0.05` for 5%           |
//!
//! Headers are matched by name, so column order does not matter. Rows may
//! appear in any order; they are sorted by `lower_bound` before the schedule
//! is validated.
//!
//! ```csv
//! lower_bound,upper_bound,rate
//! 0,300000,0
//! 300000,700000,0.05
//! 700000,,0.10
//! ```

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{BracketSchedule, ScheduleError, TaxBracket};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading a bracket table.
#[derive(Debug, Error)]
pub enum BracketLoadError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("invalid bracket table: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("cannot read bracket table '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for BracketLoadError {
    fn from(err: csv::Error) -> Self {
        BracketLoadError::CsvParse(err.to_string())
    }
}

/// A single row of the bracket table CSV.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    #[serde(deserialize_with = "deserialize_decimal")]
    pub lower_bound: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub rate: Decimal,
}

impl From<&BracketRecord> for TaxBracket {
    fn from(record: &BracketRecord) -> Self {
        TaxBracket::new(record.lower_bound, record.upper_bound, record.rate)
    }
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<Decimal>().map_err(serde::de::Error::custom)
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket tables stored as CSV.
pub struct BracketTableLoader;

impl BracketTableLoader {
    /// Parse bracket records from a CSV reader, in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        debug!(count = records.len(), "parsed bracket records");
        Ok(records)
    }

    /// Sort records by lower bound and validate them into a schedule.
    pub fn into_schedule(records: &[BracketRecord]) -> Result<BracketSchedule, BracketLoadError> {
        let mut brackets: Vec<TaxBracket> = records.iter().map(TaxBracket::from).collect();
        brackets.sort_by(|a, b| a.lower_bound.cmp(&b.lower_bound));

        Ok(BracketSchedule::new(brackets)?)
    }

    /// Read, parse and validate a bracket table file.
    pub fn load_from_file(path: &Path) -> Result<BracketSchedule, BracketLoadError> {
        let file = File::open(path).map_err(|source| BracketLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let records = Self::parse(file)?;
        let schedule = Self::into_schedule(&records)?;

        info!(
            path = %path.display(),
            brackets = schedule.len(),
            "loaded bracket table"
        );
        Ok(schedule)
    }
}
