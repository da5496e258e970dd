//! The tax engine: validation plus the two calculators combined.
//!
//! # Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Reject non-positive income and percentages outside `0..=100` |
//! | 2    | Bracket tax on the full income |
//! | 3    | Supplemental tax on the declared shares |
//! | 4    | Total tax (step 2 + step 3) |
//! | 5    | Net income (income − step 4), not clamped |
//! | 6    | Effective rate (step 4 × 100 ÷ income) |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::TaxInput;
//! use tax_core::calculations::TaxEngine;
//!
//! let engine = TaxEngine::default();
//! let input = TaxInput::income(dec!(1500000)).with_investing(dec!(20), true, true);
//!
//! let result = engine.compute(&input).unwrap();
//!
//! assert_eq!(result.bracket_tax, dec!(140000));
//! assert_eq!(result.supplemental_tax, dec!(60000));
//! assert_eq!(result.total_tax, dec!(200000));
//! assert_eq!(result.net_income, dec!(1300000));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::bracket::BracketTaxCalculator;
use crate::calculations::common::is_valid_percentage;
use crate::calculations::supplemental::{
    SupplementalRates, SupplementalRatesError, SupplementalTaxCalculator,
};
use crate::{BracketSchedule, TaxInput, TaxResult};

/// Which declaration an out-of-range percentage came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
    Spending,
    Investing,
}

impl std::fmt::Display for Declaration {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Spending => f.write_str("spending"),
            Self::Investing => f.write_str("investing"),
        }
    }
}

/// Input rejected before any computation took place.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidInputError {
    /// Annual income must be strictly positive.
    #[error("annual income must be greater than zero, got {0}")]
    NonPositiveIncome(Decimal),

    /// A declared percentage is outside `0..=100`.
    #[error("{declaration} percentage must be between 0 and 100, got {value}")]
    PercentageOutOfRange {
        declaration: Declaration,
        value: Decimal,
    },

    /// The combined tax on this income does not fit in a `Decimal`.
    /// Only reachable with rate tables well above the standard ones.
    #[error("tax on income {0} is too large to represent")]
    TaxOutOfRange(Decimal),
}

/// Computes a [`TaxResult`] from a [`TaxInput`].
///
/// The engine holds an immutable bracket schedule and rate table and has no
/// other state, so one instance can serve any number of callers and threads.
#[derive(Debug, Clone)]
pub struct TaxEngine {
    schedule: BracketSchedule,
    supplemental: SupplementalTaxCalculator,
}

impl TaxEngine {
    /// Builds an engine from a validated schedule and a rate table.
    ///
    /// # Errors
    ///
    /// Returns [`SupplementalRatesError`] if any supplemental rate is outside
    /// `[0, 1]`.
    pub fn new(
        schedule: BracketSchedule,
        rates: SupplementalRates,
    ) -> Result<Self, SupplementalRatesError> {
        rates.validate()?;
        Ok(Self {
            schedule,
            supplemental: SupplementalTaxCalculator::new(rates),
        })
    }

    pub fn schedule(&self) -> &BracketSchedule {
        &self.schedule
    }

    pub fn rates(&self) -> &SupplementalRates {
        self.supplemental.rates()
    }

    /// Runs the full computation.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError`] if income is not positive, a declared
    /// percentage is outside `0..=100`, or the total tax overflows. No
    /// partial result is produced.
    pub fn compute(
        &self,
        input: &TaxInput,
    ) -> Result<TaxResult, InvalidInputError> {
        self.validate(input)?;

        let income = input.annual_income;

        let bracket = BracketTaxCalculator::new(&self.schedule).apply(income);
        let supplemental =
            self.supplemental
                .apply(income, input.spending.as_ref(), input.investing.as_ref());

        let out_of_range = || InvalidInputError::TaxOutOfRange(income);
        let supplemental_tax = supplemental.checked_total().ok_or_else(out_of_range)?;
        let total_tax = bracket
            .total_tax
            .checked_add(supplemental_tax)
            .ok_or_else(out_of_range)?;
        let net_income = income - total_tax;
        let effective_rate_percent = match total_tax.checked_mul(dec!(100)) {
            Some(scaled) => scaled / income,
            None => total_tax / income * dec!(100),
        };

        debug!(
            income = %income,
            bracket_tax = %bracket.total_tax,
            supplemental_tax = %supplemental_tax,
            total_tax = %total_tax,
            effective_rate = %effective_rate_percent,
            "tax computed"
        );

        Ok(TaxResult {
            annual_income: income,
            bracket_tax: bracket.total_tax,
            breakdown: bracket.breakdown,
            spending_tax: supplemental.spending_tax,
            investing_tax: supplemental.investing_tax,
            supplemental_tax,
            total_tax,
            net_income,
            effective_rate_percent,
        })
    }

    fn validate(
        &self,
        input: &TaxInput,
    ) -> Result<(), InvalidInputError> {
        if input.annual_income <= Decimal::ZERO {
            return Err(InvalidInputError::NonPositiveIncome(input.annual_income));
        }

        let spend_pct = input.spending.as_ref().map(|s| s.percentage);
        let invest_pct = input.investing.as_ref().map(|i| i.percentage);

        if let Some(value) = spend_pct.filter(|p| !is_valid_percentage(*p)) {
            return Err(InvalidInputError::PercentageOutOfRange {
                declaration: Declaration::Spending,
                value,
            });
        }
        if let Some(value) = invest_pct.filter(|p| !is_valid_percentage(*p)) {
            return Err(InvalidInputError::PercentageOutOfRange {
                declaration: Declaration::Investing,
                value,
            });
        }

        if let (Some(spend), Some(invest)) = (spend_pct, invest_pct) {
            if spend + invest > dec!(100) {
                warn!(
                    spending = %spend,
                    investing = %invest,
                    "declared spending and investing shares exceed 100% of income; taxing both as declared"
                );
            }
        }

        Ok(())
    }
}

impl Default for TaxEngine {
    fn default() -> Self {
        Self {
            schedule: BracketSchedule::standard(),
            supplemental: SupplementalTaxCalculator::default(),
        }
    }
}
