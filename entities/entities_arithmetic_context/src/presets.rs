//! Named Context Presets
//!
//! Process-wide contexts for common decimal formats, initialized once on
//! first use and shared read-only.

use lazy_static::lazy_static;
use malachite::Natural;

use crate::context::ArithmeticContext;
use crate::flags::Flags;
use crate::rounding::Rounding;

lazy_static! {
    static ref UNLIMITED: ArithmeticContext = ArithmeticContext::unbounded(Rounding::HalfEven);

    // 96-bit coefficient, scale 0 to 28
    static ref CLI_DECIMAL: ArithmeticContext = preset(96, Rounding::HalfEven, -28, 0, true)
        .with_precision_in_bits(true)
        .with_adjust_exponent(false);

    static ref DECIMAL32: ArithmeticContext = preset(7, Rounding::HalfEven, -95, 96, true);
    static ref DECIMAL64: ArithmeticContext = preset(16, Rounding::HalfEven, -383, 384, true);
    static ref DECIMAL128: ArithmeticContext = preset(34, Rounding::HalfEven, -6143, 6144, true);

    static ref BASIC: ArithmeticContext =
        preset(9, Rounding::HalfUp, -999_999_999, 999_999_999, false)
            .with_traps(Flags::INVALID | Flags::DIVIDE_BY_ZERO | Flags::OVERFLOW);
}

fn preset(precision: u32, rounding: Rounding, e_min: i64, e_max: i64, clamp: bool) -> ArithmeticContext {
    ArithmeticContext::bounded(Natural::from(precision), rounding, e_min, e_max, clamp)
}

impl ArithmeticContext {
    /// Unlimited precision, no exponent range, rounding half-even.
    pub fn unlimited() -> &'static ArithmeticContext {
        &UNLIMITED
    }

    /// The 96-bit CLI decimal format: a coefficient below 2^96 and a scale
    /// from 0 to 28 (raw exponent -28 to 0), rounding half-even.
    ///
    /// Results beyond the largest representable magnitude
    /// (about 7.9228 × 10^28) become infinities; nothing is trapped.
    pub fn cli_decimal() -> &'static ArithmeticContext {
        &CLI_DECIMAL
    }

    /// IEEE 754 decimal32 interchange format.
    pub fn decimal32() -> &'static ArithmeticContext {
        &DECIMAL32
    }

    /// IEEE 754 decimal64 interchange format.
    pub fn decimal64() -> &'static ArithmeticContext {
        &DECIMAL64
    }

    /// IEEE 754 decimal128 interchange format.
    pub fn decimal128() -> &'static ArithmeticContext {
        &DECIMAL128
    }

    /// General Decimal Arithmetic basic context: nine digits, rounding
    /// half-up, trapping invalid operations, division by zero and overflow.
    pub fn basic() -> &'static ArithmeticContext {
        &BASIC
    }
}
