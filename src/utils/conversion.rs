//! Decimal conversion and guarded arithmetic.
//!
//! Every ratio in the pricing core goes through [`safe_div`], so a zero
//! reserve or a zero native price never reaches `BigDecimal`'s division.

use alloy::primitives::hex;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Zero;
use once_cell::sync::Lazy;
use std::str::FromStr;

// ============================================
// Hex Encoding
// ============================================

/// Encode bytes as a lowercase hex string with 0x prefix.
pub fn hex_encode(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

// ============================================
// Guarded Arithmetic
// ============================================

/// Divide `numerator` by `denominator`, returning `None` when the divisor is zero.
#[inline]
pub fn safe_div(numerator: &BigDecimal, denominator: &BigDecimal) -> Option<BigDecimal> {
    if denominator.is_zero() {
        None
    } else {
        Some(numerator / denominator)
    }
}

// ============================================
// Raw Amount Conversions
// ============================================

/// Scale a raw on-chain integer amount to token units.
///
/// `convert_token_to_decimal(1_500_000, 6)` is `1.5`. Zero decimals returns the
/// amount unchanged.
pub fn convert_token_to_decimal(amount: &BigInt, decimals: u8) -> BigDecimal {
    let value = BigDecimal::from(amount.clone());
    if decimals == 0 {
        return value;
    }
    value / big_pow10(decimals)
}

/// Same as [`convert_token_to_decimal`] for amounts stored as decimal strings.
///
/// Returns `None` if the string is not an integer.
pub fn str_to_token_decimal(amount: &str, decimals: u8) -> Option<BigDecimal> {
    let raw = BigInt::from_str(amount.trim()).ok()?;
    Some(convert_token_to_decimal(&raw, decimals))
}

// ============================================
// Internal Helpers
// ============================================

static POW10_CACHE: Lazy<[BigDecimal; 25]> =
    Lazy::new(|| std::array::from_fn(|i| BigDecimal::from(BigInt::from(10u32).pow(i as u32))));

/// Compute 10^exp as BigDecimal.
pub(crate) fn big_pow10(exp: u8) -> BigDecimal {
    if (exp as usize) < POW10_CACHE.len() {
        POW10_CACHE[exp as usize].clone()
    } else {
        BigDecimal::from(BigInt::from(10u32).pow(exp as u32))
    }
}
