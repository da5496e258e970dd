//! Supplemental levies on declared spending and investing.
//!
//! Two independent flat-rate levies are added on top of bracket tax:
//!
//! | Declaration | Condition                | Base                      | Default rate |
//! |-------------|--------------------------|---------------------------|--------------|
//! | Spending    | category Basic           | income × spend % / 100    | 12%          |
//! | Spending    | category Elevated        | income × spend % / 100    | 18%          |
//! | Spending    | category Luxury          | income × spend % / 100    | 28%          |
//! | Investing   | profitable, short term   | income × invest % / 100   | 20%          |
//! | Investing   | profitable, long term    | income × invest % / 100   | 12.5%        |
//! | Investing   | not profitable           | -                         | nothing      |
//!
//! The two shares are not required to be disjoint; each is computed on its
//! own against the full income.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{SpendingCategory, SpendingDeclaration};
//! use tax_core::calculations::{SupplementalRates, SupplementalTaxCalculator};
//!
//! let calculator = SupplementalTaxCalculator::new(SupplementalRates::default());
//! let spending = SpendingDeclaration {
//!     percentage: dec!(50),
//!     category: SpendingCategory::Basic,
//! };
//!
//! let result = calculator.apply(dec!(1000000), Some(&spending), None);
//!
//! assert_eq!(result.total(), dec!(60000));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::percent_of;
use crate::{InvestingDeclaration, InvestmentOutcome, SpendingCategory, SpendingDeclaration};

/// Errors raised when a supplemental rate table is invalid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SupplementalRatesError {
    #[error("{name} must be between 0 and 1, got {value}")]
    RateOutOfRange { name: &'static str, value: Decimal },
}

/// Flat rates applied to the declared spending and investing shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplementalRates {
    pub basic_spending_rate: Decimal,
    pub elevated_spending_rate: Decimal,
    pub luxury_spending_rate: Decimal,
    pub short_term_gain_rate: Decimal,
    pub long_term_gain_rate: Decimal,
}

impl Default for SupplementalRates {
    fn default() -> Self {
        Self {
            basic_spending_rate: dec!(0.12),
            elevated_spending_rate: dec!(0.18),
            luxury_spending_rate: dec!(0.28),
            short_term_gain_rate: dec!(0.20),
            long_term_gain_rate: dec!(0.125),
        }
    }
}

impl SupplementalRates {
    /// Checks that every rate lies in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`SupplementalRatesError::RateOutOfRange`] naming the first
    /// offending rate.
    pub fn validate(&self) -> Result<(), SupplementalRatesError> {
        let rates = [
            ("basic_spending_rate", self.basic_spending_rate),
            ("elevated_spending_rate", self.elevated_spending_rate),
            ("luxury_spending_rate", self.luxury_spending_rate),
            ("short_term_gain_rate", self.short_term_gain_rate),
            ("long_term_gain_rate", self.long_term_gain_rate),
        ];
        for (name, value) in rates {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(SupplementalRatesError::RateOutOfRange { name, value });
            }
        }
        Ok(())
    }

    pub fn spending_rate(
        &self,
        category: SpendingCategory,
    ) -> Decimal {
        match category {
            SpendingCategory::Basic => self.basic_spending_rate,
            SpendingCategory::Elevated => self.elevated_spending_rate,
            SpendingCategory::Luxury => self.luxury_spending_rate,
        }
    }

    /// Rate for an investment outcome; `None` when nothing is owed.
    pub fn investing_rate(
        &self,
        outcome: InvestmentOutcome,
    ) -> Option<Decimal> {
        match outcome {
            InvestmentOutcome::Loss => None,
            InvestmentOutcome::Profit { short_term: true } => Some(self.short_term_gain_rate),
            InvestmentOutcome::Profit { short_term: false } => Some(self.long_term_gain_rate),
        }
    }
}

/// Supplemental tax split by declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SupplementalTax {
    pub spending_tax: Decimal,
    pub investing_tax: Decimal,
}

impl SupplementalTax {
    pub fn total(&self) -> Decimal {
        self.spending_tax + self.investing_tax
    }

    /// [`total`](Self::total), or `None` if the sum overflows.
    pub fn checked_total(&self) -> Option<Decimal> {
        self.spending_tax.checked_add(self.investing_tax)
    }
}

/// Computes the spending and investing levies.
#[derive(Debug, Clone)]
pub struct SupplementalTaxCalculator {
    rates: SupplementalRates,
}

impl SupplementalTaxCalculator {
    pub fn new(rates: SupplementalRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &SupplementalRates {
        &self.rates
    }

    /// Applies both levies to `income`. A missing declaration contributes
    /// zero. Percentages are taken as already validated.
    pub fn apply(
        &self,
        income: Decimal,
        spending: Option<&SpendingDeclaration>,
        investing: Option<&InvestingDeclaration>,
    ) -> SupplementalTax {
        SupplementalTax {
            spending_tax: spending.map_or(Decimal::ZERO, |s| self.spending_tax(income, s)),
            investing_tax: investing.map_or(Decimal::ZERO, |i| self.investing_tax(income, i)),
        }
    }

    fn spending_tax(
        &self,
        income: Decimal,
        spending: &SpendingDeclaration,
    ) -> Decimal {
        let spend_amount = percent_of(income, spending.percentage);
        spend_amount * self.rates.spending_rate(spending.category)
    }

    fn investing_tax(
        &self,
        income: Decimal,
        investing: &InvestingDeclaration,
    ) -> Decimal {
        match self.rates.investing_rate(investing.outcome) {
            Some(rate) => percent_of(income, investing.percentage) * rate,
            None => Decimal::ZERO,
        }
    }
}

impl Default for SupplementalTaxCalculator {
    fn default() -> Self {
        Self::new(SupplementalRates::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn spending(
        percentage: Decimal,
        category: SpendingCategory,
    ) -> SpendingDeclaration {
        SpendingDeclaration {
            percentage,
            category,
        }
    }

    // =========================================================================
    // SupplementalRates tests
    // =========================================================================

    #[test]
    fn default_rates_are_valid() {
        assert_eq!(SupplementalRates::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let rates = SupplementalRates {
            luxury_spending_rate: dec!(1.28),
            ..SupplementalRates::default()
        };

        assert_eq!(
            rates.validate(),
            Err(SupplementalRatesError::RateOutOfRange {
                name: "luxury_spending_rate",
                value: dec!(1.28),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_rate() {
        let rates = SupplementalRates {
            long_term_gain_rate: dec!(-0.125),
            ..SupplementalRates::default()
        };

        assert!(rates.validate().is_err());
    }

    #[test]
    fn investing_rate_is_none_for_loss() {
        let rates = SupplementalRates::default();

        assert_eq!(rates.investing_rate(InvestmentOutcome::Loss), None);
        assert_eq!(
            rates.investing_rate(InvestmentOutcome::Profit { short_term: false }),
            Some(dec!(0.125))
        );
    }

    // =========================================================================
    // spending tests
    // =========================================================================

    #[test]
    fn basic_spending_half_of_income() {
        let calculator = SupplementalTaxCalculator::default();
        let decl = spending(dec!(50), SpendingCategory::Basic);

        let result = calculator.apply(dec!(1000000), Some(&decl), None);

        assert_eq!(result.spending_tax, dec!(60000));
        assert_eq!(result.investing_tax, dec!(0));
    }

    #[test]
    fn elevated_spending_uses_eighteen_percent() {
        let calculator = SupplementalTaxCalculator::default();
        let decl = spending(dec!(10), SpendingCategory::Elevated);

        let result = calculator.apply(dec!(1000000), Some(&decl), None);

        assert_eq!(result.spending_tax, dec!(18000));
    }

    #[test]
    fn luxury_spending_uses_twenty_eight_percent() {
        let calculator = SupplementalTaxCalculator::default();
        let decl = spending(dec!(10), SpendingCategory::Luxury);

        let result = calculator.apply(dec!(1000000), Some(&decl), None);

        assert_eq!(result.spending_tax, dec!(28000));
    }

    #[test]
    fn zero_percent_spending_contributes_nothing() {
        let calculator = SupplementalTaxCalculator::default();
        let decl = spending(dec!(0), SpendingCategory::Luxury);

        let result = calculator.apply(dec!(1000000), Some(&decl), None);

        assert_eq!(result.total(), dec!(0));
    }

    // =========================================================================
    // investing tests
    // =========================================================================

    #[test]
    fn short_term_profit_uses_twenty_percent() {
        let calculator = SupplementalTaxCalculator::default();
        let decl = InvestingDeclaration::new(dec!(20), true, true);

        let result = calculator.apply(dec!(1500000), None, Some(&decl));

        assert_eq!(result.investing_tax, dec!(60000));
    }

    #[test]
    fn long_term_profit_uses_twelve_and_a_half_percent() {
        let calculator = SupplementalTaxCalculator::default();
        let decl = InvestingDeclaration::new(dec!(20), true, false);

        let result = calculator.apply(dec!(1500000), None, Some(&decl));

        assert_eq!(result.investing_tax, dec!(37500));
    }

    #[test]
    fn loss_contributes_nothing_regardless_of_share() {
        let calculator = SupplementalTaxCalculator::default();

        for short_term in [true, false] {
            let decl = InvestingDeclaration::new(dec!(100), false, short_term);
            let result = calculator.apply(dec!(1500000), None, Some(&decl));
            assert_eq!(result.investing_tax, dec!(0));
        }
    }

    // =========================================================================
    // combined tests
    // =========================================================================

    #[test]
    fn no_declarations_yield_zero() {
        let calculator = SupplementalTaxCalculator::default();

        let result = calculator.apply(dec!(1000000), None, None);

        assert_eq!(result, SupplementalTax::default());
    }

    #[test]
    fn overlapping_shares_are_taxed_independently() {
        let calculator = SupplementalTaxCalculator::default();
        let spend = spending(dec!(80), SpendingCategory::Basic);
        let invest = InvestingDeclaration::new(dec!(80), true, true);

        let result = calculator.apply(dec!(100000), Some(&spend), Some(&invest));

        // 80000 × 12% + 80000 × 20%
        assert_eq!(result.spending_tax, dec!(9600));
        assert_eq!(result.investing_tax, dec!(16000));
        assert_eq!(result.total(), dec!(25600));
    }

    #[test]
    fn custom_rates_are_honoured() {
        let calculator = SupplementalTaxCalculator::new(SupplementalRates {
            basic_spending_rate: dec!(0.05),
            ..SupplementalRates::default()
        });
        let decl = spending(dec!(100), SpendingCategory::Basic);

        let result = calculator.apply(dec!(200000), Some(&decl), None);

        assert_eq!(result.spending_tax, dec!(10000));
    }
}
