use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single progressive bracket (slab).
///
/// `upper_bound` of `None` means the bracket is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        lower_bound: Decimal,
        upper_bound: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self {
            lower_bound,
            upper_bound,
            rate,
        }
    }

    /// Plain-digit label for the bracket's range, e.g. `300000 - 700000`
    /// or `1500000 - ∞`.
    pub fn range_label(&self) -> String {
        match self.upper_bound {
            Some(upper) => format!("{} - {}", self.lower_bound.normalize(), upper.normalize()),
            None => format!("{} - ∞", self.lower_bound.normalize()),
        }
    }
}

/// Errors raised when a bracket table violates the schedule invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("bracket schedule is empty")]
    Empty,

    #[error("first bracket must start at 0, got {0}")]
    FirstLowerBoundNotZero(Decimal),

    #[error("bracket {index} starts at {lower_bound} but the previous bracket ends at {expected}")]
    NotContiguous {
        index: usize,
        lower_bound: Decimal,
        expected: Decimal,
    },

    #[error("bracket {index} has upper bound {upper_bound} not above its lower bound {lower_bound}")]
    EmptyRange {
        index: usize,
        lower_bound: Decimal,
        upper_bound: Decimal,
    },

    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedBeforeLast(usize),

    #[error("last bracket must be unbounded, but it ends at {0}")]
    LastBracketBounded(Decimal),

    #[error("bracket {index} rate must be between 0 and 1, got {rate}")]
    RateOutOfRange { index: usize, rate: Decimal },

    #[error("bracket {index} rate {rate} is lower than the previous rate {previous}")]
    DecreasingRate {
        index: usize,
        rate: Decimal,
        previous: Decimal,
    },
}

/// An ordered, validated table of progressive brackets.
///
/// Once built the schedule is read-only; the only way to obtain one is
/// through [`BracketSchedule::new`] (which checks every invariant) or
/// [`BracketSchedule::standard`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    /// Validates `brackets` and wraps them in a schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] if the brackets are empty, do not start at
    /// zero, leave gaps or overlap, contain an empty range, are not
    /// terminated by a single unbounded bracket, or carry rates outside
    /// `[0, 1]` or in decreasing order.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, ScheduleError> {
        let first = brackets.first().ok_or(ScheduleError::Empty)?;
        if first.lower_bound != Decimal::ZERO {
            return Err(ScheduleError::FirstLowerBoundNotZero(first.lower_bound));
        }

        let last_index = brackets.len() - 1;
        let mut expected_lower = Decimal::ZERO;
        let mut previous_rate = Decimal::ZERO;

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.lower_bound != expected_lower {
                return Err(ScheduleError::NotContiguous {
                    index,
                    lower_bound: bracket.lower_bound,
                    expected: expected_lower,
                });
            }
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(ScheduleError::RateOutOfRange {
                    index,
                    rate: bracket.rate,
                });
            }
            if bracket.rate < previous_rate {
                return Err(ScheduleError::DecreasingRate {
                    index,
                    rate: bracket.rate,
                    previous: previous_rate,
                });
            }

            match bracket.upper_bound {
                Some(upper) if index == last_index => {
                    return Err(ScheduleError::LastBracketBounded(upper));
                }
                Some(upper) if upper <= bracket.lower_bound => {
                    return Err(ScheduleError::EmptyRange {
                        index,
                        lower_bound: bracket.lower_bound,
                        upper_bound: upper,
                    });
                }
                Some(upper) => expected_lower = upper,
                None if index != last_index => {
                    return Err(ScheduleError::UnboundedBeforeLast(index));
                }
                None => {}
            }

            previous_rate = bracket.rate;
        }

        Ok(Self { brackets })
    }

    /// The illustrative six-slab table used when no other table is configured.
    pub fn standard() -> Self {
        Self {
            brackets: vec![
                TaxBracket::new(dec!(0), Some(dec!(300000)), dec!(0)),
                TaxBracket::new(dec!(300000), Some(dec!(700000)), dec!(0.05)),
                TaxBracket::new(dec!(700000), Some(dec!(1000000)), dec!(0.10)),
                TaxBracket::new(dec!(1000000), Some(dec!(1200000)), dec!(0.15)),
                TaxBracket::new(dec!(1200000), Some(dec!(1500000)), dec!(0.20)),
                TaxBracket::new(dec!(1500000), None, dec!(0.30)),
            ],
        }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }
}

impl Default for BracketSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

impl AsRef<[TaxBracket]> for BracketSchedule {
    fn as_ref(&self) -> &[TaxBracket] {
        &self.brackets
    }
}
