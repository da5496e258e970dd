use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Class of goods the declared spending goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpendingCategory {
    #[default]
    Basic,
    Elevated,
    Luxury,
}

impl SpendingCategory {
    pub fn all() -> &'static [SpendingCategory] {
        &[
            SpendingCategory::Basic,
            SpendingCategory::Elevated,
            SpendingCategory::Luxury,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Elevated => "elevated",
            Self::Luxury => "luxury",
        }
    }

    /// Case-insensitive parse. Also accepts the older `kindOfFancy` /
    /// `veryFancy` spellings.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "elevated" | "kindoffancy" => Some(Self::Elevated),
            "luxury" | "veryfancy" => Some(Self::Luxury),
            _ => None,
        }
    }
}

impl std::fmt::Display for SpendingCategory {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared share of income spent on one class of goods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingDeclaration {
    /// Share of annual income, `0..=100`.
    pub percentage: Decimal,
    pub category: SpendingCategory,
}

/// How an investment turned out.
///
/// The holding period only matters for a profit, so it only exists there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InvestmentOutcome {
    Loss,
    Profit { short_term: bool },
}

/// A declared share of income invested, with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestingDeclaration {
    /// Share of annual income, `0..=100`.
    pub percentage: Decimal,
    #[serde(flatten)]
    pub outcome: InvestmentOutcome,
}

impl InvestingDeclaration {
    /// Builds a declaration from the flat `profitable` / `short_term` flags.
    /// `short_term` is ignored when the investment was not profitable.
    pub fn new(
        percentage: Decimal,
        profitable: bool,
        short_term: bool,
    ) -> Self {
        let outcome = if profitable {
            InvestmentOutcome::Profit { short_term }
        } else {
            InvestmentOutcome::Loss
        };
        Self {
            percentage,
            outcome,
        }
    }

    pub fn profitable(&self) -> bool {
        matches!(self.outcome, InvestmentOutcome::Profit { .. })
    }

    pub fn short_term(&self) -> bool {
        matches!(self.outcome, InvestmentOutcome::Profit { short_term: true })
    }
}

/// Everything the engine needs for one computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInput {
    pub annual_income: Decimal,
    pub spending: Option<SpendingDeclaration>,
    pub investing: Option<InvestingDeclaration>,
}

impl TaxInput {
    /// Income only, with no spending or investing declared.
    pub fn income(annual_income: Decimal) -> Self {
        Self {
            annual_income,
            spending: None,
            investing: None,
        }
    }

    pub fn with_spending(
        mut self,
        percentage: Decimal,
        category: SpendingCategory,
    ) -> Self {
        self.spending = Some(SpendingDeclaration {
            percentage,
            category,
        });
        self
    }

    pub fn with_investing(
        mut self,
        percentage: Decimal,
        profitable: bool,
        short_term: bool,
    ) -> Self {
        self.investing = Some(InvestingDeclaration::new(percentage, profitable, short_term));
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn spending_category_parse_is_case_insensitive() {
        assert_eq!(SpendingCategory::parse("basic"), Some(SpendingCategory::Basic));
        assert_eq!(SpendingCategory::parse("Elevated"), Some(SpendingCategory::Elevated));
        assert_eq!(SpendingCategory::parse(" LUXURY "), Some(SpendingCategory::Luxury));
        assert_eq!(SpendingCategory::parse("fancy"), None);
    }

    #[test]
    fn spending_category_parse_accepts_legacy_names() {
        assert_eq!(SpendingCategory::parse("kindOfFancy"), Some(SpendingCategory::Elevated));
        assert_eq!(SpendingCategory::parse("veryFancy"), Some(SpendingCategory::Luxury));
    }

    #[test]
    fn spending_category_round_trips_through_as_str() {
        for category in SpendingCategory::all() {
            assert_eq!(SpendingCategory::parse(category.as_str()), Some(*category));
        }
    }

    #[test]
    fn investing_loss_drops_short_term_flag() {
        let declaration = InvestingDeclaration::new(dec!(20), false, true);

        assert_eq!(declaration.outcome, InvestmentOutcome::Loss);
        assert!(!declaration.profitable());
        assert!(!declaration.short_term());
    }

    #[test]
    fn investing_profit_keeps_short_term_flag() {
        let declaration = InvestingDeclaration::new(dec!(20), true, true);

        assert_eq!(declaration.outcome, InvestmentOutcome::Profit { short_term: true });
        assert!(declaration.profitable());
        assert!(declaration.short_term());
    }

    #[test]
    fn builder_sets_both_declarations() {
        let input = TaxInput::income(dec!(1000000))
            .with_spending(dec!(50), SpendingCategory::Luxury)
            .with_investing(dec!(10), true, false);

        assert_eq!(
            input.spending,
            Some(SpendingDeclaration {
                percentage: dec!(50),
                category: SpendingCategory::Luxury,
            })
        );
        assert_eq!(
            input.investing.map(|i| i.outcome),
            Some(InvestmentOutcome::Profit { short_term: false })
        );
    }
}
