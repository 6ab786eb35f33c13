//! Coefficient Digit Helpers
//!
//! Low-level operations on decimal coefficients: dropping trailing digits
//! while classifying what was dropped, padding with zeros, and measuring
//! a coefficient against a digit or bit precision.

use malachite::base::num::arithmetic::traits::{DivMod, Pow};
use malachite::base::num::basic::traits::{One, Zero};
use malachite::base::num::logic::traits::SignificantBits;
use malachite::Natural;

use entities_arithmetic_context::{ArithmeticContext, Rounding};
use entities_utilities::decimal::digit_count;

/// Largest number of digits a padded coefficient or a saturated largest
/// finite value is built with. Beyond it the value counts as
/// unrepresentable.
pub const MAX_BUILT_DIGITS: u64 = 1 << 20;

/// Bit precisions up to this size have their digit count measured on the
/// built coefficient; larger ones are computed from `log10(2)`.
const EXACT_DIGITS_BITS: u64 = 4096;

/// `log10(2)` truncated to 72 decimal places, as two 36-digit halves.
const LOG10_2_HIGH: u128 = 301_029_995_663_981_195_213_738_894_724_493_026;
const LOG10_2_LOW: u128 = 768_189_881_462_108_541_310_427_461_127_108_189;
const LOG10_2_PLACES: u64 = 72;

/// What a digit drop discarded, relative to half a unit in the last kept place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discarded {
    /// Nothing, or only zeros
    Zero,
    BelowHalf,
    Half,
    AboveHalf,
}

/// `10^d`
pub fn ten_pow(d: u64) -> Natural {
    Natural::from(10u32).pow(d)
}

/// Drop the `d` least significant digits of `c`.
///
/// Returns the truncated quotient and a classification of the remainder.
pub fn shift_right(c: &Natural, d: u64) -> (Natural, Discarded) {
    if d == 0 {
        return (c.clone(), Discarded::Zero);
    }
    if d > digit_count(c) {
        let discarded = if *c == 0u32 {
            Discarded::Zero
        } else {
            Discarded::BelowHalf
        };
        return (Natural::ZERO, discarded);
    }
    let divisor = ten_pow(d);
    let (quotient, remainder) = c.div_mod(&divisor);
    let discarded = if remainder == 0u32 {
        Discarded::Zero
    } else {
        match (remainder * Natural::from(2u32)).cmp(&divisor) {
            std::cmp::Ordering::Less => Discarded::BelowHalf,
            std::cmp::Ordering::Equal => Discarded::Half,
            std::cmp::Ordering::Greater => Discarded::AboveHalf,
        }
    };
    (quotient, discarded)
}

/// Whether the truncated quotient `q` of a value with the given sign
/// must be incremented (away from zero) under `rounding`.
///
/// `Rounding::None` never increments; callers reject inexact results
/// under that mode before asking.
pub fn rounds_away(rounding: Rounding, negative: bool, q: &Natural, discarded: Discarded) -> bool {
    if discarded == Discarded::Zero {
        return false;
    }
    let last_digit = q % Natural::from(10u32);
    match rounding {
        Rounding::None | Rounding::Down => false,
        Rounding::Up => true,
        Rounding::Ceiling => !negative,
        Rounding::Floor => negative,
        Rounding::HalfUp => discarded != Discarded::BelowHalf,
        Rounding::HalfDown => discarded == Discarded::AboveHalf,
        Rounding::HalfEven => match discarded {
            Discarded::AboveHalf => true,
            Discarded::Half => last_digit % Natural::from(2u32) == 1u32,
            _ => false,
        },
        Rounding::Odd => last_digit % Natural::from(2u32) == 0u32,
        Rounding::ZeroFiveUp | Rounding::OddOrZeroFiveUp => last_digit == 0u32 || last_digit == 5u32,
    }
}

/// Coefficient size limit of a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Unlimited,
    Digits(u64),
    Bits(u64),
}

impl Limit {
    /// A precision too large for `u64` cannot be reached by any coefficient
    /// that fits in memory, so it counts as unlimited.
    pub fn of(ctx: &ArithmeticContext) -> Self {
        match u64::try_from(ctx.precision()) {
            Ok(0) | Err(_) => Limit::Unlimited,
            Ok(p) if ctx.is_precision_in_bits() => Limit::Bits(p),
            Ok(p) => Limit::Digits(p),
        }
    }

    pub fn fits(self, c: &Natural) -> bool {
        match self {
            Limit::Unlimited => true,
            Limit::Digits(p) => digit_count(c) <= p,
            Limit::Bits(p) => c.significant_bits() <= p,
        }
    }

    /// Largest coefficient allowed.
    ///
    /// `None` when unlimited, or when the coefficient would have more than
    /// [`MAX_BUILT_DIGITS`] digits.
    pub fn max_coefficient(self) -> Option<Natural> {
        if self.digits()? > MAX_BUILT_DIGITS {
            return None;
        }
        match self {
            Limit::Unlimited => None,
            Limit::Digits(p) => Some(ten_pow(p) - Natural::ONE),
            Limit::Bits(p) => Some((Natural::ONE << p) - Natural::ONE),
        }
    }

    /// Number of decimal digits in the largest allowed coefficient.
    pub fn digits(self) -> Option<u64> {
        match self {
            Limit::Unlimited => None,
            Limit::Digits(p) => Some(p),
            Limit::Bits(p) => Some(bits_to_digits(p)),
        }
    }
}

/// Number of decimal digits in `2^p - 1`, for `p >= 1`.
///
/// `2^p` is never a power of ten, so this is `floor(p * log10(2)) + 1`.
fn bits_to_digits(p: u64) -> u64 {
    if p <= EXACT_DIGITS_BITS {
        return digit_count(&((Natural::ONE << p) - Natural::ONE));
    }
    let scale = ten_pow(LOG10_2_PLACES);
    let log = Natural::from(LOG10_2_HIGH) * ten_pow(36) + Natural::from(LOG10_2_LOW);
    // the truncated constant and its successor bracket log10(2); below
    // 2^64 both give the same floor
    let upper = Natural::from(p) * (log + Natural::ONE) / scale;
    u64::try_from(&upper).map_or(u64::MAX, |k| k.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: u64) -> Natural {
        Natural::from(v)
    }

    #[test]
    fn test_shift_right_classifies_remainder() {
        assert_eq!(shift_right(&n(12345), 2), (n(123), Discarded::BelowHalf));
        assert_eq!(shift_right(&n(12350), 2), (n(123), Discarded::Half));
        assert_eq!(shift_right(&n(12351), 2), (n(123), Discarded::AboveHalf));
        assert_eq!(shift_right(&n(12300), 2), (n(123), Discarded::Zero));
        assert_eq!(shift_right(&n(12300), 0), (n(12300), Discarded::Zero));
    }

    #[test]
    fn test_shift_right_past_all_digits() {
        assert_eq!(shift_right(&n(999), 3), (n(0), Discarded::AboveHalf));
        assert_eq!(shift_right(&n(999), 4), (n(0), Discarded::BelowHalf));
        assert_eq!(shift_right(&n(0), 40), (n(0), Discarded::Zero));
    }

    #[test]
    fn test_rounds_away_half_even() {
        assert!(!rounds_away(Rounding::HalfEven, false, &n(12), Discarded::Half));
        assert!(rounds_away(Rounding::HalfEven, false, &n(13), Discarded::Half));
        assert!(rounds_away(Rounding::HalfEven, false, &n(12), Discarded::AboveHalf));
    }

    #[test]
    fn test_rounds_away_directed() {
        assert!(rounds_away(Rounding::Ceiling, false, &n(1), Discarded::BelowHalf));
        assert!(!rounds_away(Rounding::Ceiling, true, &n(1), Discarded::BelowHalf));
        assert!(rounds_away(Rounding::Floor, true, &n(1), Discarded::BelowHalf));
        assert!(rounds_away(Rounding::Up, true, &n(1), Discarded::BelowHalf));
        assert!(!rounds_away(Rounding::Up, true, &n(1), Discarded::Zero));
    }

    #[test]
    fn test_rounds_away_odd_and_zero_five() {
        assert!(rounds_away(Rounding::Odd, false, &n(14), Discarded::BelowHalf));
        assert!(!rounds_away(Rounding::Odd, false, &n(15), Discarded::AboveHalf));
        assert!(rounds_away(Rounding::ZeroFiveUp, false, &n(15), Discarded::BelowHalf));
        assert!(rounds_away(Rounding::OddOrZeroFiveUp, false, &n(20), Discarded::BelowHalf));
        assert!(!rounds_away(Rounding::ZeroFiveUp, false, &n(16), Discarded::AboveHalf));
    }

    #[test]
    fn test_limits() {
        assert!(Limit::Digits(3).fits(&n(999)));
        assert!(!Limit::Digits(3).fits(&n(1000)));
        assert!(Limit::Bits(8).fits(&n(255)));
        assert!(!Limit::Bits(8).fits(&n(256)));
        assert_eq!(Limit::Bits(8).digits(), Some(3));
        assert_eq!(Limit::Digits(2).max_coefficient(), Some(n(99)));
        assert_eq!(Limit::Unlimited.max_coefficient(), None);
    }

    #[test]
    fn test_bit_digits_match_built_coefficient() {
        for p in [1u64, 10, 96, EXACT_DIGITS_BITS, EXACT_DIGITS_BITS + 1, 5000, 10_000, 65_536] {
            let max = (Natural::ONE << p) - Natural::ONE;
            assert_eq!(Limit::Bits(p).digits(), Some(digit_count(&max)), "bits {}", p);
        }
    }

    #[test]
    fn test_huge_limits_are_not_built() {
        assert_eq!(Limit::Bits(u64::MAX).digits(), Some(5_553_023_288_523_357_132));
        assert_eq!(Limit::Bits(i64::MAX as u64).digits(), Some(2_776_511_644_261_678_566));
        assert_eq!(Limit::Digits(u64::MAX).max_coefficient(), None);
        assert_eq!(Limit::Bits(u64::MAX).max_coefficient(), None);
        assert_eq!(Limit::Digits(MAX_BUILT_DIGITS + 1).max_coefficient(), None);
        assert_eq!(Limit::Digits(4).max_coefficient(), Some(n(9999)));
    }

    #[test]
    fn test_limit_of_context() {
        assert_eq!(Limit::of(ArithmeticContext::unlimited()), Limit::Unlimited);
        assert_eq!(Limit::of(ArithmeticContext::cli_decimal()), Limit::Bits(96));
        assert_eq!(Limit::of(ArithmeticContext::decimal64()), Limit::Digits(16));
    }
}
