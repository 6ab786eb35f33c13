//! Round-to-Context Module
//!
//! Rounds a [`BigDecimal`] to the precision and exponent range of an
//! [`ArithmeticContext`], reporting the conditions the rounding signaled.
//!
//! ## Pipeline
//!
//! 1. NaN and infinities pass through unchanged.
//! 2. **Precision**: the fewest trailing digits are dropped so the
//!    coefficient fits the context precision (digits or bits), rounding
//!    the dropped part with the context's [`Rounding`].
//! 3. **Exponent range** (only when the context has one):
//!    - raw exponents (`adjust_exponent == false`) are checked with
//!      [`ArithmeticContext::exponent_within_range`]; an exponent below
//!      `e_min` is rescaled to `e_min`, one above `e_max` is padded down to
//!      `e_max` when clamping is on and the padded coefficient still fits,
//!      and overflows otherwise
//!    - adjusted exponents above `e_max` overflow; clamping pads normal
//!      results to `e_max - digits + 1`; results below `e_min` are
//!      subnormal and rescaled to `e_tiny = e_min - digits + 1`
//! 4. **Overflow** yields an infinity or the largest finite value,
//!    depending on the rounding direction.
//!
//! [`round_to_context`] is pure. [`round_with_flags`] additionally records
//! the conditions on the context and fails on trapped ones.

use malachite::base::num::basic::traits::One;
use malachite::{Integer, Natural};
use tracing::debug;

use entities_arithmetic_context::{ArithmeticContext, ContextError, Flags, Rounding};
use entities_utilities::decimal::digit_count;
use entities_utilities::BigDecimal;

use crate::digits::{rounds_away, shift_right, ten_pow, Discarded, Limit, MAX_BUILT_DIGITS};

/// Rounding errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundingError {
    /// The context rejected the result (a trapped condition)
    Context(ContextError),
}

impl std::fmt::Display for RoundingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundingError::Context(e) => write!(f, "Rounding failed: {}", e),
        }
    }
}

impl std::error::Error for RoundingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoundingError::Context(e) => Some(e),
        }
    }
}

impl From<ContextError> for RoundingError {
    fn from(e: ContextError) -> Self {
        RoundingError::Context(e)
    }
}

/// Result type for rounding operations
pub type RoundingResult<T> = Result<T, RoundingError>;

/// A rounded value and the conditions its rounding signaled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rounded {
    pub value: BigDecimal,
    pub conditions: Flags,
}

/// Round `value` to `ctx` without touching the context.
pub fn round_to_context(value: &BigDecimal, ctx: &ArithmeticContext) -> Rounded {
    let (negative, coefficient, exponent) = match value {
        BigDecimal::Finite {
            negative,
            coefficient,
            exponent,
        } => (*negative, coefficient, exponent),
        other => {
            return Rounded {
                value: other.clone(),
                conditions: Flags::empty(),
            }
        }
    };

    let mut rounder = Rounder {
        ctx,
        limit: Limit::of(ctx),
        negative,
        conditions: Flags::empty(),
    };
    let value = match rounder.round(coefficient.clone(), exponent.clone()) {
        Ok((coefficient, exponent)) => BigDecimal::finite(negative, coefficient, exponent),
        Err(Exceptional::Invalid) => {
            rounder.conditions |= Flags::INVALID;
            BigDecimal::NaN
        }
        Err(Exceptional::Overflow) => rounder.overflow(),
    };
    Rounded {
        value,
        conditions: rounder.conditions,
    }
}

/// Round `value` to `ctx`, record the signaled conditions on `ctx` (when
/// it has flag support) and fail if any of them is trapped.
pub fn round_with_flags(
    value: &BigDecimal,
    ctx: &mut ArithmeticContext,
) -> RoundingResult<BigDecimal> {
    let Rounded { value, conditions } = round_to_context(value, ctx);
    ctx.trigger_traps(conditions)?;
    Ok(value)
}

/// Results that leave the finite pipeline.
enum Exceptional {
    /// Rounding was required under `Rounding::None`
    Invalid,
    Overflow,
}

struct Rounder<'a> {
    ctx: &'a ArithmeticContext,
    limit: Limit,
    negative: bool,
    conditions: Flags,
}

impl Rounder<'_> {
    fn round(&mut self, c: Natural, e: Integer) -> Result<(Natural, Integer), Exceptional> {
        let (c, e) = self.fit_precision(c, e)?;
        if !self.ctx.has_exponent_range() {
            return Ok((c, e));
        }
        if self.ctx.adjust_exponent() {
            self.fit_adjusted_range(c, e)
        } else {
            self.fit_raw_range(c, e)
        }
    }

    /// Drop `d` trailing digits with rounding; `d` saturates, the
    /// exponent moves by the exact amount.
    fn drop_digits(
        &mut self,
        c: &Natural,
        e: &Integer,
        d: &Integer,
    ) -> Result<(Natural, Integer), Exceptional> {
        let count = u64::try_from(d).unwrap_or(u64::MAX);
        let (mut q, discarded) = shift_right(c, count);
        if count > 0 {
            self.conditions |= Flags::ROUNDED;
        }
        if discarded != Discarded::Zero {
            if self.ctx.rounding() == Rounding::None {
                return Err(Exceptional::Invalid);
            }
            self.conditions |= Flags::INEXACT;
            if rounds_away(self.ctx.rounding(), self.negative, &q, discarded) {
                q += Natural::ONE;
            }
        }
        Ok((q, e + d))
    }

    fn fit_precision(&mut self, c: Natural, e: Integer) -> Result<(Natural, Integer), Exceptional> {
        if self.limit.fits(&c) {
            return Ok((c, e));
        }
        let n = digit_count(&c);
        match self.limit {
            Limit::Unlimited => Ok((c, e)),
            Limit::Digits(p) => {
                let (q, e) = self.drop_digits(&c, &e, &Integer::from(n - p))?;
                if digit_count(&q) > p {
                    // carried into a new digit: q is 10^p
                    let (q, _) = shift_right(&q, 1);
                    return Ok((q, e + Integer::ONE));
                }
                Ok((q, e))
            }
            Limit::Bits(_) => {
                let max_digits = self.limit.digits().unwrap_or(n);
                let mut d = n.saturating_sub(max_digits).max(1);
                loop {
                    let (q, shifted) = self.drop_digits(&c, &e, &Integer::from(d))?;
                    if self.limit.fits(&q) {
                        return Ok((q, shifted));
                    }
                    d += 1;
                }
            }
        }
    }

    fn fit_raw_range(&mut self, c: Natural, e: Integer) -> Result<(Natural, Integer), Exceptional> {
        let ctx = self.ctx;
        if ctx.exponent_within_range(Some(&e)).unwrap_or(true) {
            return Ok((c, e));
        }
        let (e_min, e_max) = (ctx.e_min(), ctx.e_max());
        if e < *e_min {
            let (q, e) = self.drop_digits(&c, &e, &(e_min - &e))?;
            if q == 0u32 && self.conditions.contains(Flags::INEXACT) {
                self.conditions |= Flags::UNDERFLOW;
            }
            return Ok((q, e));
        }
        if c == 0u32 {
            self.conditions |= Flags::CLAMPED;
            return Ok((c, e_max.clone()));
        }
        if self.ctx.clamp_normal_exponents() {
            let padding = &e - e_max;
            if let Some(padded) = self.pad(&c, &padding) {
                self.conditions |= Flags::CLAMPED;
                return Ok((padded, e_max.clone()));
            }
        }
        Err(Exceptional::Overflow)
    }

    fn fit_adjusted_range(
        &mut self,
        mut c: Natural,
        mut e: Integer,
    ) -> Result<(Natural, Integer), Exceptional> {
        let (e_min, e_max) = (self.ctx.e_min().clone(), self.ctx.e_max().clone());
        let digits = self.limit.digits();
        let adjusted = &e + Integer::from(digit_count(&c)) - Integer::ONE;

        if adjusted > e_max {
            if c != 0u32 {
                return Err(Exceptional::Overflow);
            }
            e = match digits {
                Some(p) if self.ctx.clamp_normal_exponents() => &e_max - Integer::from(p) + Integer::ONE,
                _ => e_max.clone(),
            };
            self.conditions |= Flags::CLAMPED;
            return Ok((c, e));
        }

        if let (Some(p), true) = (digits, self.ctx.clamp_normal_exponents()) {
            let top = &e_max - Integer::from(p) + Integer::ONE;
            if e > top {
                if c == 0u32 {
                    self.conditions |= Flags::CLAMPED;
                    return Ok((c, top));
                }
                let wanted = &e - &top;
                let room = Integer::from(p - digit_count(&c).min(p));
                let padding = if wanted < room { wanted } else { room };
                if let Some(padded) = self.pad(&c, &padding) {
                    if padding > 0u32 {
                        self.conditions |= Flags::CLAMPED;
                        e -= &padding;
                        c = padded;
                    }
                }
            }
        }

        if adjusted < e_min {
            if c != 0u32 {
                self.conditions |= Flags::SUBNORMAL;
            }
            let e_tiny = match digits {
                Some(p) => &e_min - Integer::from(p) + Integer::ONE,
                None => e_min.clone(),
            };
            if e < e_tiny {
                if c == 0u32 {
                    self.conditions |= Flags::CLAMPED;
                    return Ok((c, e_tiny));
                }
                let (q, shifted) = self.drop_digits(&c, &e, &(&e_tiny - &e))?;
                if self.conditions.contains(Flags::INEXACT) {
                    self.conditions |= Flags::UNDERFLOW;
                }
                return Ok((q, shifted));
            }
        }
        Ok((c, e))
    }

    /// `c * 10^padding` when the result still fits the precision.
    fn pad(&self, c: &Natural, padding: &Integer) -> Option<Natural> {
        let padding = u64::try_from(padding).ok()?;
        if padding > MAX_BUILT_DIGITS {
            return None;
        }
        if let Some(p) = self.limit.digits() {
            if digit_count(c).saturating_add(padding) > p {
                return None;
            }
        }
        let padded = c * ten_pow(padding);
        self.limit.fits(&padded).then_some(padded)
    }

    fn overflow(&mut self) -> BigDecimal {
        self.conditions |= Flags::OVERFLOW | Flags::INEXACT | Flags::ROUNDED;
        let rounding = self.ctx.rounding();
        if rounding == Rounding::None {
            self.conditions |= Flags::INVALID;
            return BigDecimal::NaN;
        }
        if !rounding.overflows_to_infinity(self.negative) {
            if let (Some(p), Some(max)) = (self.limit.digits(), self.limit.max_coefficient()) {
                let e_max = self.ctx.e_max();
                let exponent = if self.ctx.adjust_exponent() {
                    e_max - Integer::from(p) + Integer::ONE
                } else {
                    e_max.clone()
                };
                return BigDecimal::finite(self.negative, max, exponent);
            }
        }
        debug!(negative = self.negative, %rounding, "overflow saturated to infinity");
        BigDecimal::infinity(self.negative)
    }
}
