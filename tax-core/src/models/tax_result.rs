use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tax contributed by one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTaxLine {
    pub range_label: String,
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
    pub tax_amount: Decimal,
}

/// Output of a single engine computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub annual_income: Decimal,

    /// Tax from the progressive brackets.
    pub bracket_tax: Decimal,

    /// Per-bracket lines, in bracket order, only for brackets that
    /// contributed a positive amount.
    pub breakdown: Vec<BracketTaxLine>,

    /// Levy on the declared spending share.
    pub spending_tax: Decimal,

    /// Levy on the declared, profitable investing share.
    pub investing_tax: Decimal,

    /// `spending_tax + investing_tax`.
    pub supplemental_tax: Decimal,

    /// `bracket_tax + supplemental_tax`.
    pub total_tax: Decimal,

    /// `annual_income - total_tax`. Can go negative.
    pub net_income: Decimal,

    /// `total_tax / annual_income * 100`.
    pub effective_rate_percent: Decimal,
}
