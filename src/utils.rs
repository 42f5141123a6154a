use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

lazy_static! {
    static ref LEADING_ZERO_FRACTION_RE: Regex = Regex::new(r"^[0]?\.[0-9]*$").unwrap();
    static ref DECIMAL_DIGITS_RE: Regex = Regex::new(r"^[0-9]*\.?[0-9]*$").unwrap();
}

// Parse a user-facing decimal string, tolerating a bare leading or trailing point
fn parse_decimal(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "." {
        return None;
    }

    let mut normalized = if trimmed.starts_with('.') {
        format!("0{}", trimmed)
    } else if trimmed.starts_with("-.") {
        format!("-0{}", &trimmed[1..])
    } else {
        trimmed.to_string()
    };

    if normalized.ends_with('.') {
        normalized.pop();
    }

    Decimal::from_str(&normalized).ok()
}

/// Convert a decimal amount to base units (lamports etc), flooring extra precision.
///
/// Non-numeric, negative or overflowing input yields zero.
pub fn to_smallest_unit(amount: &str, decimals: u8) -> u128 {
    let Some(value) = parse_decimal(amount) else {
        return 0;
    };

    10i128
        .checked_pow(decimals as u32)
        .and_then(|scale| Decimal::try_from_i128_with_scale(scale, 0).ok())
        .and_then(|scale| value.checked_mul(scale))
        .and_then(|scaled| scaled.floor().to_u128())
        .unwrap_or(0)
}

/// Convert base units back into a decimal string without trailing zeros
pub fn from_smallest_unit(amount: u128, decimals: u8) -> String {
    let Some(divisor) = 10u128.checked_pow(decimals as u32) else {
        return "0".to_string();
    };

    let quotient = amount / divisor;
    let remainder = amount % divisor;

    let padded = format!("{:0width$}", remainder, width = decimals as usize);
    let decimal_part = padded.trim_end_matches('0');

    if decimal_part.is_empty() {
        return quotient.to_string();
    }

    format!("{}.{}", quotient, decimal_part)
}

/// Parse a base-unit integer string as returned by the quote API
pub fn parse_base_units(amount: &str) -> Option<u128> {
    amount.trim().parse::<u128>().ok()
}

/// Round to `decimals` places and strip trailing zeros and a dangling point
pub fn format_amount(amount: &str, decimals: u8) -> String {
    match parse_decimal(amount) {
        Some(value) => value
            .round_dp_with_strategy(decimals as u32, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
            .to_string(),
        None => "0".to_string(),
    }
}

/// Keystroke-level check for amount fields
pub fn is_valid_amount_input(value: &str) -> bool {
    value.is_empty()
        || value == "."
        || LEADING_ZERO_FRACTION_RE.is_match(value)
        || DECIMAL_DIGITS_RE.is_match(value)
}

/// Semantic check: empty, or a positive number with at most `decimals` fractional digits
pub fn validate_amount(value: &str, decimals: u8) -> bool {
    if value.is_empty() {
        return true;
    }

    let Some(numeric_value) = parse_decimal(value) else {
        return false;
    };

    if numeric_value <= Decimal::ZERO {
        return false;
    }

    match value.split('.').nth(1) {
        Some(fraction) => fraction.len() <= decimals as usize,
        None => true,
    }
}

// Shorten address for display
pub fn shorten_address(address: &str) -> String {
    let char_count = address.chars().count();
    if char_count <= 10 {
        return address.to_string();
    }

    let start: String = address.chars().take(5).collect();
    let end: String = address.chars().skip(char_count - 5).collect();

    format!("{}...{}", start, end)
}
