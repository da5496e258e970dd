//! Common utility functions for tax calculations.
//!
//! This module provides shared arithmetic used by both calculators and the
//! engine, plus the half-up rounding the presentation layer applies before
//! display.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Rounds a decimal value to `dp` decimal places using half-up rounding.
///
/// Values exactly at the midpoint round away from zero. The calculators
/// never round internally; this is for display.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454), 2), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455), 2), dec!(123.46));
/// assert_eq!(round_half_up(dec!(2500.5), 0), dec!(2501));
/// assert_eq!(round_half_up(dec!(-123.455), 2), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns `percentage` percent of `amount`.
///
/// The percentage is scaled down first, so for `percentage <= 100` the
/// result never exceeds `amount` and cannot overflow.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(1000000), dec!(50)), dec!(500000));
/// assert_eq!(percent_of(dec!(1500000), dec!(12.5)), dec!(187500));
/// ```
pub fn percent_of(
    amount: Decimal,
    percentage: Decimal,
) -> Decimal {
    amount * (percentage / dec!(100))
}

/// Whether `percentage` lies in the closed range `0..=100`.
pub fn is_valid_percentage(percentage: Decimal) -> bool {
    percentage >= Decimal::ZERO && percentage <= dec!(100)
}
