//! Rupee and percentage formatting with Indian digit grouping
//! (`12,34,567`: the last three digits, then pairs).

use rust_decimal::Decimal;
use tax_core::calculations::common::round_half_up;

/// Groups a string of ASCII digits the Indian way.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Formats a whole-rupee figure with Indian grouping and no currency sign.
/// Fractions are rounded half-up to the nearest rupee.
pub fn format_number(value: Decimal) -> String {
    let rounded = round_half_up(value, 0);
    let digits = rounded.abs().trunc().normalize().to_string();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", group_indian(&digits))
    } else {
        group_indian(&digits)
    }
}

/// Formats an amount as rupees, e.g. `₹1,40,000` or `-₹28,000`.
pub fn format_rupees(value: Decimal) -> String {
    let number = format_number(value);
    match number.strip_prefix('-') {
        Some(abs) => format!("-₹{abs}"),
        None => format!("₹{number}"),
    }
}

/// Formats a slab range, e.g. `₹3,00,000 - ₹7,00,000` or `₹15,00,000 - ∞`.
pub fn format_slab(
    lower: Decimal,
    upper: Option<Decimal>,
) -> String {
    match upper {
        Some(upper) => format!("{} - {}", format_rupees(lower), format_rupees(upper)),
        None => format!("{} - ∞", format_rupees(lower)),
    }
}

/// Formats a fractional rate as a percentage without trailing zeros,
/// e.g. `0.125` as `12.5%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

/// Formats a percentage value to at most two decimal places.
pub fn format_percent(percent: Decimal) -> String {
    format!("{}%", round_half_up(percent, 2).normalize())
}
