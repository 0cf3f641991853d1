use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};

pub const TARGET_DECIMALS: u32 = 4;

/// Parses a plain decimal literal (`-12`, `3.`, `0.12345`) and rounds it to
/// four places, ties to even.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let body = s.strip_prefix('-').unwrap_or(s);
    let mut parts = body.split('.');
    let int_part = parts.next()?;
    let frac_part = parts.next();
    if parts.next().is_some() || int_part.is_empty() {
        return None;
    }
    let digits_only = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if !digits_only(int_part) || !frac_part.is_none_or(digits_only) {
        return None;
    }

    let value = Decimal::from_str(s.trim_end_matches('.')).ok()?;
    Some(value.round_dp_with_strategy(TARGET_DECIMALS, RoundingStrategy::MidpointNearestEven))
}

/// Renders an amount with exactly four decimal places.
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded =
        amount.round_dp_with_strategy(TARGET_DECIMALS, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(TARGET_DECIMALS);
    rounded.to_string()
}

pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_amount(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("Invalid amount format: {}", s)))
}
