use std::fmt;

use rust_decimal::Decimal;
use tax_core::TaxResult;

use crate::format::{format_percent, format_rate, format_rupees, format_slab};

/// Terminal rendering of a [`TaxResult`].
#[derive(Debug)]
pub struct Report<'a> {
    result: &'a TaxResult,
}

impl<'a> Report<'a> {
    pub fn new(result: &'a TaxResult) -> Self {
        Self { result }
    }

    /// Breakdown rows as (slab, rate, tax).
    fn rows(&self) -> Vec<(String, String, String)> {
        let mut rows: Vec<_> = self
            .result
            .breakdown
            .iter()
            .map(|line| {
                (
                    format_slab(line.lower_bound, line.upper_bound),
                    format_rate(line.rate),
                    format_rupees(line.tax_amount),
                )
            })
            .collect();

        if self.result.supplemental_tax > Decimal::ZERO {
            rows.push((
                "Additional tax".to_string(),
                "-".to_string(),
                format_rupees(self.result.supplemental_tax),
            ));
        }
        rows
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = self.result;

        writeln!(f, "{:<18}{}", "Annual income:", format_rupees(r.annual_income))?;
        writeln!(f, "{:<18}{}", "Income tax:", format_rupees(r.bracket_tax))?;
        writeln!(f, "{:<18}{}", "Additional tax:", format_rupees(r.supplemental_tax))?;
        if r.spending_tax > Decimal::ZERO && r.investing_tax > Decimal::ZERO {
            writeln!(f, "{:<18}{}", "  on spending:", format_rupees(r.spending_tax))?;
            writeln!(f, "{:<18}{}", "  on investing:", format_rupees(r.investing_tax))?;
        }
        writeln!(f, "{:<18}{}", "Total tax:", format_rupees(r.total_tax))?;
        writeln!(f, "{:<18}{}", "Take-home amount:", format_rupees(r.net_income))?;
        writeln!(f, "{:<18}{}", "Total tax rate:", format_percent(r.effective_rate_percent))?;

        if r.breakdown.is_empty() {
            return Ok(());
        }

        let rows = self.rows();
        let slab_width = rows
            .iter()
            .map(|(slab, _, _)| slab.chars().count())
            .max()
            .unwrap_or(0)
            .max("Slab".len());

        writeln!(f)?;
        writeln!(f, "Tax breakdown")?;
        writeln!(f, "{:<slab_width$}  {:>6}  {}", "Slab", "Rate", "Tax")?;
        for (slab, rate, tax) in rows {
            writeln!(f, "{slab:<slab_width$}  {rate:>6}  {tax}")?;
        }
        Ok(())
    }
}
