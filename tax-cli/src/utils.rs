use rust_decimal::Decimal;
use tax_core::SpendingCategory;
use thiserror::Error;

/// Error returned when free-text input cannot be turned into a number.
#[derive(Debug, Error)]
pub enum ParseAmountError {
    #[error("no amount entered")]
    Empty,

    #[error("invalid number '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },
}

/// Normalizes input for decimal parsing: trims whitespace and drops the
/// rupee sign and grouping separators, so both `12,00,000` and
/// `1,200,000` read as the same figure.
fn normalize_decimal_input(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | '₹') && !c.is_whitespace())
        .collect()
}

/// Parses a free-text amount such as `₹12,00,000` or `1500000.50`.
///
/// Empty or whitespace-only input is an error rather than zero: an
/// unentered income means there is nothing to compute.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Err(ParseAmountError::Empty);
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid amount: {}", e);
        ParseAmountError::Invalid {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a percentage, with or without a trailing `%`.
///
/// Range checking is left to the engine.
pub fn parse_percentage(s: &str) -> Result<Decimal, ParseAmountError> {
    parse_amount(s.trim().trim_end_matches('%'))
}

/// Parses a spending category name for the command line.
pub fn parse_category(s: &str) -> Result<SpendingCategory, String> {
    SpendingCategory::parse(s).ok_or_else(|| {
        let names: Vec<&str> = SpendingCategory::all().iter().map(|c| c.as_str()).collect();
        format!("unknown spending category '{s}' (expected one of: {})", names.join(", "))
    })
}
