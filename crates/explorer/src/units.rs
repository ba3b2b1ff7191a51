//! Wei and gwei formatting.

use num_bigint::BigUint;
use num_traits::Num;

pub const ETHER_DECIMALS: u32 = 18;
pub const GWEI_DECIMALS: u32 = 9;

/// Renders an integer amount with `decimals` implied decimal places,
/// dropping trailing zeros: `1500000000000000000` at 18 is `1.5`.
pub fn format_units(value: &BigUint, decimals: u32) -> String {
    let digits = value.to_str_radix(10);
    let decimals = decimals as usize;
    let (integer, fraction) = if digits.len() > decimals {
        let (integer, fraction) = digits.split_at(digits.len() - decimals);
        (integer.to_string(), fraction.to_string())
    } else {
        ("0".to_string(), format!("{digits:0>decimals$}"))
    };
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        integer
    } else {
        format!("{integer}.{fraction}")
    }
}

/// [`format_units`] for the decimal strings Blockscout returns.
pub fn format_decimal(value: &str, decimals: u32) -> Option<String> {
    BigUint::from_str_radix(value, 10)
        .ok()
        .map(|value| format_units(&value, decimals))
}

/// Parses a user-typed amount such as `0.25` into base units. Rejects
/// signs, exponents, and more fractional digits than `decimals`.
pub fn parse_units(amount: &str, decimals: u32) -> Option<BigUint> {
    let (integer, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(integer) || !all_digits(fraction) || fraction.len() > decimals as usize {
        return None;
    }
    let decimals = decimals as usize;
    let digits = format!("{integer}{fraction:0<decimals$}");
    BigUint::from_str_radix(&digits, 10).ok()
}
