//! Tax calculation modules.
//!
//! This module provides the two leaf calculators (progressive brackets and
//! supplemental levies) and the engine that combines them.

pub mod bracket;
pub mod common;
pub mod engine;
pub mod supplemental;

pub use bracket::{BracketTax, BracketTaxCalculator};
pub use engine::{Declaration, InvalidInputError, TaxEngine};
pub use supplemental::{
    SupplementalRates, SupplementalRatesError, SupplementalTax, SupplementalTaxCalculator,
};
