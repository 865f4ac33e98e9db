//! Decimal vote-share computation.

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use stele_types::Uint;

/// Fractional digits kept in a percentage. Digits beyond are truncated.
pub const PERCENT_SCALE: u32 = 18;

/// `part / total * 100`, truncated to [`PERCENT_SCALE`] fractional digits.
///
/// Zero when `total` is zero. `part` is never larger than `total` for a
/// consistent tally; a larger `part` saturates at 100.
pub fn percentage(part: &Uint, total: &Uint) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    if part >= total {
        return Decimal::ONE_HUNDRED;
    }

    let scaled = part.as_biguint() * BigUint::from(100u32) * BigUint::from(10u32).pow(PERCENT_SCALE)
        / total.as_biguint();

    // part < total bounds the mantissa below 100 * 10^18, well inside i128
    // and the 96-bit Decimal mantissa.
    scaled
        .to_i128()
        .and_then(|mantissa| Decimal::try_from_i128_with_scale(mantissa, PERCENT_SCALE).ok())
        .map(|d| d.normalize())
        .unwrap_or(Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn pct(part: u64, total: u64) -> Decimal {
        percentage(&Uint::from(part), &Uint::from(total))
    }

    #[test]
    fn zero_total_is_zero() {
        assert_eq!(pct(0, 0), Decimal::ZERO);
    }

    #[test]
    fn exact_shares_are_exact() {
        assert_eq!(pct(300, 400), Decimal::from(75));
        assert_eq!(pct(100, 400), Decimal::from(25));
        assert_eq!(pct(0, 400), Decimal::ZERO);
        assert_eq!(pct(400, 400), Decimal::ONE_HUNDRED);
        assert_eq!(pct(1, 8), Decimal::from_str("12.5").unwrap());
    }

    #[test]
    fn repeating_shares_truncate() {
        assert_eq!(pct(1, 3), Decimal::from_str("33.333333333333333333").unwrap());
        assert_eq!(pct(2, 3), Decimal::from_str("66.666666666666666666").unwrap());
    }

    #[test]
    fn handles_weights_beyond_u128() {
        let total: Uint = "200000000000000000000000000000000000000000000000000"
            .parse()
            .unwrap();
        let part: Uint = "50000000000000000000000000000000000000000000000000"
            .parse()
            .unwrap();
        assert_eq!(percentage(&part, &total), Decimal::from(25));
    }

    #[test]
    fn oversized_part_saturates() {
        assert_eq!(pct(5, 4), Decimal::ONE_HUNDRED);
    }
}
