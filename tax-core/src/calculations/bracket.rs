//! Progressive bracket (slab) taxation.
//!
//! Income is sliced across the brackets of a [`BracketSchedule`] from the
//! bottom up. Each slice is taxed at its bracket's rate and the slices are
//! summed. The walk stops as soon as the whole income has been placed, so
//! brackets above the income are never visited.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::BracketSchedule;
//! use tax_core::calculations::BracketTaxCalculator;
//!
//! let schedule = BracketSchedule::standard();
//! let calculator = BracketTaxCalculator::new(&schedule);
//!
//! let result = calculator.apply(dec!(1000000));
//!
//! // 5% of 400000 + 10% of 300000
//! assert_eq!(result.total_tax, dec!(50000));
//! assert_eq!(result.breakdown.len(), 2);
//! assert_eq!(result.breakdown[0].range_label, "300000 - 700000");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::calculations::common::max;
use crate::{BracketSchedule, BracketTaxLine, TaxBracket};

/// Total bracket tax and the lines that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BracketTax {
    pub total_tax: Decimal,
    pub breakdown: Vec<BracketTaxLine>,
}

/// Applies a bracket schedule to an income figure.
#[derive(Debug, Clone, Copy)]
pub struct BracketTaxCalculator<'a> {
    brackets: &'a [TaxBracket],
}

impl<'a> BracketTaxCalculator<'a> {
    pub fn new(schedule: &'a BracketSchedule) -> Self {
        Self {
            brackets: schedule.brackets(),
        }
    }

    /// Computes the bracket tax for `income`.
    ///
    /// An income on a bracket boundary is attributed entirely to the lower
    /// bracket. Zero income yields zero tax and no lines. Callers must reject
    /// negative income; it short-circuits to zero here.
    pub fn apply(
        &self,
        income: Decimal,
    ) -> BracketTax {
        let mut remaining = income;
        let mut previous_upper = Decimal::ZERO;
        let mut result = BracketTax::default();

        for bracket in self.brackets {
            if remaining <= Decimal::ZERO {
                break;
            }

            let span = self.taxable_span(bracket, remaining, previous_upper);
            let tax = span * bracket.rate;

            trace!(
                range = %bracket.range_label(),
                span = %span,
                rate = %bracket.rate,
                tax = %tax,
                "bracket visited"
            );

            result.total_tax += tax;
            if tax > Decimal::ZERO {
                result.breakdown.push(Self::line(bracket, tax));
            }

            remaining -= span;
            if let Some(upper) = bracket.upper_bound {
                previous_upper = upper;
            }
        }

        result
    }

    /// Portion of `remaining` that falls inside `bracket`, never negative.
    fn taxable_span(
        &self,
        bracket: &TaxBracket,
        remaining: Decimal,
        previous_upper: Decimal,
    ) -> Decimal {
        let span = match bracket.upper_bound {
            Some(upper) => remaining.min(upper - previous_upper),
            None => remaining,
        };
        max(span, Decimal::ZERO)
    }

    fn line(
        bracket: &TaxBracket,
        tax_amount: Decimal,
    ) -> BracketTaxLine {
        BracketTaxLine {
            range_label: bracket.range_label(),
            lower_bound: bracket.lower_bound,
            upper_bound: bracket.upper_bound,
            rate: bracket.rate,
            tax_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn breakdown_sum(result: &BracketTax) -> Decimal {
        result.breakdown.iter().map(|l| l.tax_amount).sum()
    }

    // =========================================================================
    // apply tests: standard schedule
    // =========================================================================

    #[test]
    fn zero_income_yields_no_tax_and_no_lines() {
        let schedule = BracketSchedule::standard();
        let calculator = BracketTaxCalculator::new(&schedule);

        let result = calculator.apply(dec!(0));

        assert_eq!(result, BracketTax::default());
    }

    #[test]
    fn income_inside_zero_rate_bracket_is_untaxed() {
        let schedule = BracketSchedule::standard();
        let calculator = BracketTaxCalculator::new(&schedule);

        let result = calculator.apply(dec!(250000));

        assert_eq!(result.total_tax, dec!(0));
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn income_on_first_boundary_is_untaxed() {
        let schedule = BracketSchedule::standard();
        let calculator = BracketTaxCalculator::new(&schedule);

        let result = calculator.apply(dec!(300000));

        assert_eq!(result.total_tax, dec!(0));
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn income_on_second_boundary_stays_in_lower_bracket() {
        let schedule = BracketSchedule::standard();
        let calculator = BracketTaxCalculator::new(&schedule);

        let result = calculator.apply(dec!(700000));

        // 5% of 400000
        assert_eq!(result.total_tax, dec!(20000));
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].rate, dec!(0.05));
        assert_eq!(result.breakdown[0].tax_amount, dec!(20000));
    }

    #[test]
    fn income_one_unit_over_boundary_reaches_next_bracket() {
        let schedule = BracketSchedule::standard();
        let calculator = BracketTaxCalculator::new(&schedule);

        let result = calculator.apply(dec!(700001));

        assert_eq!(result.total_tax, dec!(20000.10));
        assert_eq!(result.breakdown.len(), 2);
        assert_eq!(result.breakdown[1].range_label, "700000 - 1000000");
        assert_eq!(result.breakdown[1].tax_amount, dec!(0.10));
    }

    #[test]
    fn income_of_one_million() {
        let schedule = BracketSchedule::standard();
        let calculator = BracketTaxCalculator::new(&schedule);

        let result = calculator.apply(dec!(1000000));

        assert_eq!(result.total_tax, dec!(50000));
    }

    #[test]
    fn income_of_one_and_a_half_million() {
        let schedule = BracketSchedule::standard();
        let calculator = BracketTaxCalculator::new(&schedule);

        let result = calculator.apply(dec!(1500000));

        // 20000 + 30000 + 30000 + 60000
        assert_eq!(result.total_tax, dec!(140000));
        assert_eq!(result.breakdown.len(), 4);
    }

    #[test]
    fn income_in_unbounded_bracket() {
        let schedule = BracketSchedule::standard();
        let calculator = BracketTaxCalculator::new(&schedule);

        let result = calculator.apply(dec!(2000000));

        // 140000 + 30% of 500000
        assert_eq!(result.total_tax, dec!(290000));
        let last = result.breakdown.last().unwrap();
        assert_eq!(last.range_label, "1500000 - ∞");
        assert_eq!(last.upper_bound, None);
        assert_eq!(last.tax_amount, dec!(150000));
    }

    #[test]
    fn breakdown_lines_follow_bracket_order() {
        let schedule = BracketSchedule::standard();
        let calculator = BracketTaxCalculator::new(&schedule);

        let result = calculator.apply(dec!(2000000));

        let rates: Vec<Decimal> = result.breakdown.iter().map(|l| l.rate).collect();
        assert_eq!(
            rates,
            vec![dec!(0.05), dec!(0.10), dec!(0.15), dec!(0.20), dec!(0.30)]
        );
    }

    #[test]
    fn breakdown_sums_to_total() {
        let schedule = BracketSchedule::standard();
        let calculator = BracketTaxCalculator::new(&schedule);

        for income in [dec!(1), dec!(345678.91), dec!(1199999.99), dec!(98765432.1)] {
            let result = calculator.apply(income);
            assert_eq!(breakdown_sum(&result), result.total_tax);
        }
    }

    #[test]
    fn negative_income_short_circuits_to_zero() {
        let schedule = BracketSchedule::standard();
        let calculator = BracketTaxCalculator::new(&schedule);

        let result = calculator.apply(dec!(-5000));

        assert_eq!(result, BracketTax::default());
    }

    // =========================================================================
    // apply tests: custom schedules
    // =========================================================================

    #[test]
    fn flat_schedule_taxes_everything_at_one_rate() {
        let schedule =
            BracketSchedule::new(vec![TaxBracket::new(dec!(0), None, dec!(0.1))]).unwrap();
        let calculator = BracketTaxCalculator::new(&schedule);

        let result = calculator.apply(dec!(12345));

        assert_eq!(result.total_tax, dec!(1234.5));
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].range_label, "0 - ∞");
    }

    #[test]
    fn taxed_first_bracket_emits_line() {
        let schedule = BracketSchedule::new(vec![
            TaxBracket::new(dec!(0), Some(dec!(10000)), dec!(0.1)),
            TaxBracket::new(dec!(10000), None, dec!(0.2)),
        ])
        .unwrap();
        let calculator = BracketTaxCalculator::new(&schedule);

        let result = calculator.apply(dec!(15000));

        assert_eq!(result.total_tax, dec!(2000));
        assert_eq!(
            result.breakdown[0],
            BracketTaxLine {
                range_label: "0 - 10000".to_string(),
                lower_bound: dec!(0),
                upper_bound: Some(dec!(10000)),
                rate: dec!(0.1),
                tax_amount: dec!(1000),
            }
        );
    }
}
