//! Hex quantities and addresses as used by `eth_*` methods.

use crate::error::{Result, WalletError};
use num_bigint::BigUint;
use num_traits::{Num, Zero};

/// Parses a `0x`-prefixed hex quantity. `0x` alone is zero.
pub fn parse_quantity(value: &str) -> Result<BigUint> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or_else(|| WalletError::InvalidResponse(format!("not a hex quantity: {value}")))?;
    if digits.is_empty() {
        return Ok(BigUint::zero());
    }
    BigUint::from_str_radix(digits, 16)
        .map_err(|_| WalletError::InvalidResponse(format!("not a hex quantity: {value}")))
}

/// Encodes a quantity without leading zeros, as JSON-RPC expects.
pub fn to_quantity(value: &BigUint) -> String {
    format!("0x{value:x}")
}

/// `0x` followed by 20 bytes of hex. Checksum casing is not verified.
pub fn is_address(value: &str) -> bool {
    match value.strip_prefix("0x") {
        Some(body) if body.len() == 40 => hex::decode(body).is_ok(),
        _ => false,
    }
}

/// `0x1234...abcd`
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantities_parse_and_encode() {
        assert_eq!(parse_quantity("0x0").unwrap(), BigUint::zero());
        assert_eq!(parse_quantity("0x").unwrap(), BigUint::zero());
        assert_eq!(
            parse_quantity("0xde0b6b3a7640000").unwrap(),
            BigUint::from(1_000_000_000_000_000_000u64)
        );
        assert!(parse_quantity("12").is_err());
        assert!(parse_quantity("0xzz").is_err());

        assert_eq!(to_quantity(&BigUint::zero()), "0x0");
        assert_eq!(to_quantity(&BigUint::from(255u32)), "0xff");
    }

    #[test]
    fn address_shape() {
        assert!(is_address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"));
        assert!(!is_address("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045"));
        assert!(!is_address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA9604"));
        assert!(!is_address("0xg8dA6BF26964aF9D7eEd9e03E53415D37aA96045"));
    }

    #[test]
    fn addresses_shorten() {
        assert_eq!(
            short_address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
            "0xd8dA...6045"
        );
        assert_eq!(short_address("0x1234"), "0x1234");
    }
}
