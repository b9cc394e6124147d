use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{CafeError, Result};

/// Round to cents for display. Internal arithmetic keeps full precision.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a money amount with two decimal places and thousands separators
pub fn format_amount(value: Decimal, currency_symbol: &str) -> String {
    let rounded = format!("{:.2}", round_cents(value));
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let negative = whole.starts_with('-');
    let digits = whole.trim_start_matches('-');

    if negative {
        format!("-{}{}.{}", currency_symbol, group_digits(digits), frac)
    } else {
        format!("{}{}.{}", currency_symbol, group_digits(digits), frac)
    }
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}

/// Parse a user-entered amount like "500" or "1,250.50"
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    let amount: Decimal = cleaned
        .parse()
        .map_err(|_| CafeError::InvalidAmount(input.to_string()))?;

    if amount.is_sign_negative() {
        return Err(CafeError::InvalidAmount(input.to_string()));
    }

    Ok(amount)
}
