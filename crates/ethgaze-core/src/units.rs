//! Wei to ether conversion.
//!
//! Balances arrive as 256-bit wei quantities that routinely exceed the f64
//! mantissa, so the conversion is integer division against 10^18 with the
//! remainder rendered as a zero-padded fraction. No floating point anywhere.

use alloy_primitives::U256;

/// 10^18 wei per ether. Fits in a single 64-bit limb.
const WEI_PER_ETH: U256 = U256::from_limbs([1_000_000_000_000_000_000u64, 0, 0, 0]);

const ETH_DECIMALS: usize = 18;

/// Render a wei quantity as an exact decimal ether string.
///
/// Whole quantities render without a fractional part (`"1"`, not `"1.0"`);
/// trailing zeros of the fraction are trimmed (`"0.5"`, not `"0.500..."`).
pub fn wei_to_eth(wei: U256) -> String {
    let (whole, frac) = wei.div_rem(WEI_PER_ETH);
    if frac.is_zero() {
        return whole.to_string();
    }

    let digits = frac.to_string();
    let mut padded = String::with_capacity(ETH_DECIMALS);
    for _ in digits.len()..ETH_DECIMALS {
        padded.push('0');
    }
    padded.push_str(&digits);
    let trimmed = padded.trim_end_matches('0');

    format!("{whole}.{trimmed}")
}
