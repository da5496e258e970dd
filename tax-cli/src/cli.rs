use std::path::PathBuf;

use clap::Parser;
use rust_decimal::Decimal;
use tax_core::{SpendingCategory, TaxInput};

use crate::utils::{parse_amount, parse_category, parse_percentage};

/// Annual income tax calculator: progressive slabs plus levies on declared
/// spending and investment gains.
#[derive(Debug, Parser)]
#[command(name = "slab-tax", version, about)]
pub struct Cli {
    /// Annual income in rupees, e.g. `12,00,000` or `1200000`.
    #[arg(value_parser = parse_amount, allow_hyphen_values = true)]
    pub income: Decimal,

    /// Share of income spent, in percent.
    #[arg(long, value_name = "PCT", value_parser = parse_percentage)]
    pub spend: Option<Decimal>,

    /// What the spending goes to: basic, elevated or luxury [default: basic].
    #[arg(long, value_name = "CATEGORY", value_parser = parse_category, requires = "spend")]
    pub category: Option<SpendingCategory>,

    /// Share of income invested, in percent.
    #[arg(long, value_name = "PCT", value_parser = parse_percentage)]
    pub invest: Option<Decimal>,

    /// The investment made money.
    #[arg(long, requires = "invest")]
    pub profit: bool,

    /// The profit was made quickly (short holding period).
    #[arg(long, requires = "profit")]
    pub short_term: bool,

    /// Bracket table CSV to use instead of the built-in slabs.
    #[arg(long, value_name = "FILE")]
    pub brackets: Option<PathBuf>,

    /// TOML settings file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `tax_core=trace`. Overrides RUST_LOG.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The engine input described by the command line.
    pub fn tax_input(&self) -> TaxInput {
        let mut input = TaxInput::income(self.income);
        if let Some(pct) = self.spend {
            input = input.with_spending(pct, self.category.unwrap_or_default());
        }
        if let Some(pct) = self.invest {
            input = input.with_investing(pct, self.profit, self.short_term);
        }
        input
    }
}
