//! Arithmetic Context Module
//!
//! Provides the configuration value that governs how a decimal arithmetic
//! engine rounds and range-checks its results.
//!
//! ## Overview
//!
//! An [`ArithmeticContext`] carries:
//! - **Precision**: maximum coefficient size in digits (or bits), 0 for unlimited
//! - **Rounding**: the [`Rounding`] mode used when digits are discarded
//! - **Exponent range**: optional `[e_min, e_max]` bounds, with clamping and
//!   adjusted-exponent options
//! - **Flags and traps**: condition bits recorded by operations, and the
//!   subset of conditions that must fail the operation instead
//!
//! Contexts are values. Every `with_*` method leaves the receiver untouched
//! and returns an independent copy, so a context can be shared freely and
//! derived per computation.
//!
//! ## Flags
//!
//! Flag support is opt-in. A context built with [`ArithmeticContext::new`]
//! rejects flag writes with [`ContextError::IllegalState`];
//! [`ArithmeticContext::with_blank_flags`] returns a copy that accepts them,
//! and [`ArithmeticContext::with_no_flags`] turns support off again.
//!
//! ```rust
//! use entities_arithmetic_context::{ArithmeticContext, Flags, Rounding};
//!
//! let ctx = ArithmeticContext::new(16, Rounding::HalfEven, -383, 384, true).unwrap();
//! assert!(ctx.clone().set_flags(Flags::INEXACT).is_err());
//!
//! let mut tracked = ctx.with_blank_flags();
//! tracked.set_flags(Flags::INEXACT).unwrap();
//! assert_eq!(tracked.flags(), Flags::INEXACT);
//! ```

use std::fmt;

use malachite::base::num::basic::traits::Zero;
use malachite::{Integer, Natural};
use tracing::debug;

use crate::flags::Flags;
use crate::rounding::Rounding;

/// Context errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// A numeric parameter is out of range
    InvalidArgument(String),
    /// A required parameter was not supplied
    NullReference(&'static str),
    /// The operation is not valid for the context's current state
    IllegalState(String),
    /// An operation signaled conditions the context traps
    Trapped {
        /// The trapped subset of the signaled conditions
        conditions: Flags,
    },
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            ContextError::NullReference(name) => write!(f, "{} is null", name),
            ContextError::IllegalState(msg) => write!(f, "Illegal state: {}", msg),
            ContextError::Trapped { conditions } => {
                write!(f, "Trapped conditions: {}", conditions)
            }
        }
    }
}

impl std::error::Error for ContextError {}

/// Result type for context operations
pub type ContextResult<T> = Result<T, ContextError>;

/// Flag support of a context.
///
/// `Unsupported` is distinct from `Enabled(Flags::empty())`: only the
/// latter accepts writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagState {
    /// Flag writes are rejected
    Unsupported,
    /// Flag writes are accepted; holds the current flags
    Enabled(Flags),
}

/// Precision, rounding, exponent range and signaling configuration for
/// decimal arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArithmeticContext {
    precision: Natural,
    precision_in_bits: bool,
    rounding: Rounding,
    e_min: Integer,
    e_max: Integer,
    has_exponent_range: bool,
    clamp_normal_exponents: bool,
    adjust_exponent: bool,
    simplified: bool,
    flags: FlagState,
    traps: Flags,
}

impl ArithmeticContext {
    /// Create a context with an exponent range.
    ///
    /// # Arguments
    ///
    /// * `precision` - Maximum number of significant digits, 0 for unlimited
    /// * `rounding` - Rounding mode
    /// * `e_min` - Smallest allowed adjusted exponent
    /// * `e_max` - Largest allowed adjusted exponent
    /// * `clamp_normal_exponents` - Whether exponents of normal results are
    ///   clamped so the coefficient can be padded to `e_max`
    ///
    /// # Returns
    ///
    /// * `Ok(ArithmeticContext)` - A context without traps or flag support
    /// * `Err(ContextError::InvalidArgument)` - `precision < 0` or `e_min > e_max`
    pub fn new(
        precision: i64,
        rounding: Rounding,
        e_min: i64,
        e_max: i64,
        clamp_normal_exponents: bool,
    ) -> ContextResult<Self> {
        let precision = natural_precision(precision)?;
        if e_min > e_max {
            return Err(ContextError::InvalidArgument(format!(
                "e_min ({}) is greater than e_max ({})",
                e_min, e_max
            )));
        }
        Ok(Self::bounded(precision, rounding, e_min, e_max, clamp_normal_exponents))
    }

    /// Context with an exponent range, from already validated parts.
    pub(crate) fn bounded(
        precision: Natural,
        rounding: Rounding,
        e_min: i64,
        e_max: i64,
        clamp_normal_exponents: bool,
    ) -> Self {
        Self {
            precision,
            precision_in_bits: false,
            rounding,
            e_min: Integer::from(e_min),
            e_max: Integer::from(e_max),
            has_exponent_range: true,
            clamp_normal_exponents,
            adjust_exponent: true,
            simplified: false,
            flags: FlagState::Unsupported,
            traps: Flags::empty(),
        }
    }

    /// Unlimited context: precision 0, no exponent range, the given rounding.
    pub(crate) fn unbounded(rounding: Rounding) -> Self {
        Self {
            precision: Natural::ZERO,
            precision_in_bits: false,
            rounding,
            e_min: Integer::ZERO,
            e_max: Integer::ZERO,
            has_exponent_range: false,
            clamp_normal_exponents: false,
            adjust_exponent: true,
            simplified: false,
            flags: FlagState::Unsupported,
            traps: Flags::empty(),
        }
    }

    /// Default context with the given rounding mode and no other constraints.
    pub fn for_rounding(rounding: Rounding) -> Self {
        Self::unbounded(rounding)
    }

    /// Default context with the given precision, rounding half-up.
    pub fn for_precision(precision: i64) -> ContextResult<Self> {
        Self::for_precision_and_rounding(precision, Rounding::HalfUp)
    }

    /// Default context with the given precision and rounding mode.
    pub fn for_precision_and_rounding(precision: i64, rounding: Rounding) -> ContextResult<Self> {
        Self::unbounded(rounding).with_precision(precision)
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// Maximum coefficient size; 0 means unlimited.
    pub fn precision(&self) -> &Natural {
        &self.precision
    }

    /// Whether `precision` counts bits rather than decimal digits.
    pub fn is_precision_in_bits(&self) -> bool {
        self.precision_in_bits
    }

    /// Whether a nonzero precision is set.
    pub fn has_max_precision(&self) -> bool {
        self.precision != 0u32
    }

    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Smallest exponent, 0 when there is no exponent range.
    pub fn e_min(&self) -> &Integer {
        &self.e_min
    }

    /// Largest exponent, 0 when there is no exponent range.
    pub fn e_max(&self) -> &Integer {
        &self.e_max
    }

    pub fn has_exponent_range(&self) -> bool {
        self.has_exponent_range
    }

    pub fn clamp_normal_exponents(&self) -> bool {
        self.clamp_normal_exponents
    }

    /// Whether exponent bounds apply to the adjusted exponent (exponent of
    /// the most significant digit) instead of the raw exponent.
    pub fn adjust_exponent(&self) -> bool {
        self.adjust_exponent
    }

    pub fn is_simplified(&self) -> bool {
        self.simplified
    }

    /// Current flags; empty when flag support is off.
    pub fn flags(&self) -> Flags {
        match self.flags {
            FlagState::Enabled(flags) => flags,
            FlagState::Unsupported => Flags::empty(),
        }
    }

    pub fn flag_state(&self) -> FlagState {
        self.flags
    }

    /// Whether flag writes are accepted.
    pub fn has_flags(&self) -> bool {
        matches!(self.flags, FlagState::Enabled(_))
    }

    pub fn traps(&self) -> Flags {
        self.traps
    }

    pub fn has_flags_or_traps(&self) -> bool {
        self.has_flags() || !self.traps.is_empty()
    }

    // ---------------------------------------------------------------------
    // Flags
    // ---------------------------------------------------------------------

    /// Replace the current flags.
    ///
    /// Fails with [`ContextError::IllegalState`] unless the context was
    /// derived with [`with_blank_flags`](Self::with_blank_flags).
    pub fn set_flags(&mut self, flags: Flags) -> ContextResult<()> {
        match self.flags {
            FlagState::Enabled(_) => {
                self.flags = FlagState::Enabled(flags);
                Ok(())
            }
            FlagState::Unsupported => Err(ContextError::IllegalState(
                "Can't set flags on a context without flag support".to_string(),
            )),
        }
    }

    /// OR `flags` into the current flags. Same rules as [`set_flags`](Self::set_flags).
    pub fn add_flags(&mut self, flags: Flags) -> ContextResult<()> {
        let current = self.flags();
        self.set_flags(current | flags)
    }

    /// Record signaled conditions, then fail if any of them is trapped.
    ///
    /// Conditions are recorded only when flag support is on; a context
    /// without flag support still traps.
    pub fn trigger_traps(&mut self, conditions: Flags) -> ContextResult<()> {
        if let FlagState::Enabled(current) = self.flags {
            self.flags = FlagState::Enabled(current | conditions);
        }
        let trapped = conditions & self.traps;
        if trapped.is_empty() {
            return Ok(());
        }
        debug!(conditions = %trapped, "arithmetic condition trapped");
        Err(ContextError::Trapped { conditions: trapped })
    }

    // ---------------------------------------------------------------------
    // Derived copies
    // ---------------------------------------------------------------------

    /// Copy with flag support on and all flags cleared.
    pub fn with_blank_flags(&self) -> Self {
        Self {
            flags: FlagState::Enabled(Flags::empty()),
            ..self.clone()
        }
    }

    /// Copy with flag support off.
    pub fn with_no_flags(&self) -> Self {
        Self {
            flags: FlagState::Unsupported,
            ..self.clone()
        }
    }

    /// Copy with traps cleared and blank flags.
    pub fn nontrapping(&self) -> Self {
        Self {
            traps: Flags::empty(),
            ..self.with_blank_flags()
        }
    }

    pub fn with_traps(&self, traps: Flags) -> Self {
        Self {
            traps,
            ..self.clone()
        }
    }

    pub fn with_rounding(&self, rounding: Rounding) -> Self {
        Self {
            rounding,
            ..self.clone()
        }
    }

    /// Copy with a new precision; fails if `precision < 0`.
    pub fn with_precision(&self, precision: i64) -> ContextResult<Self> {
        let precision = natural_precision(precision)?;
        Ok(Self {
            precision,
            ..self.clone()
        })
    }

    /// Copy with an arbitrary-size precision.
    ///
    /// # Returns
    ///
    /// * `Err(ContextError::NullReference)` - `precision` is `None`
    /// * `Err(ContextError::InvalidArgument)` - `precision` is negative
    pub fn with_big_precision(&self, precision: Option<&Integer>) -> ContextResult<Self> {
        let precision = precision.ok_or(ContextError::NullReference("precision"))?;
        let precision = Natural::try_from(precision).map_err(|_| {
            ContextError::InvalidArgument(format!("precision ({}) is less than 0", precision))
        })?;
        Ok(Self {
            precision,
            ..self.clone()
        })
    }

    pub fn with_precision_in_bits(&self, precision_in_bits: bool) -> Self {
        Self {
            precision_in_bits,
            ..self.clone()
        }
    }

    /// Copy with the exponent range `[e_min, e_max]`; fails if `e_min > e_max`.
    pub fn with_exponent_range(&self, e_min: i64, e_max: i64) -> ContextResult<Self> {
        self.with_big_exponent_range(Some(&Integer::from(e_min)), Some(&Integer::from(e_max)))
    }

    /// Copy with an exponent range given as big integers.
    ///
    /// # Returns
    ///
    /// * `Err(ContextError::NullReference)` - either bound is `None`
    /// * `Err(ContextError::InvalidArgument)` - `e_min > e_max`, or a bound
    ///   does not fit in 64 signed bits
    pub fn with_big_exponent_range(
        &self,
        e_min: Option<&Integer>,
        e_max: Option<&Integer>,
    ) -> ContextResult<Self> {
        let e_min = e_min.ok_or(ContextError::NullReference("e_min"))?;
        let e_max = e_max.ok_or(ContextError::NullReference("e_max"))?;
        for bound in [e_min, e_max] {
            if i64::try_from(bound).is_err() {
                return Err(ContextError::InvalidArgument(format!(
                    "exponent bound ({}) exceeds 64 bits",
                    bound
                )));
            }
        }
        if e_min > e_max {
            return Err(ContextError::InvalidArgument(format!(
                "e_min ({}) is greater than e_max ({})",
                e_min, e_max
            )));
        }
        Ok(Self {
            e_min: e_min.clone(),
            e_max: e_max.clone(),
            has_exponent_range: true,
            ..self.clone()
        })
    }

    /// Copy without an exponent range. The stored bounds are kept.
    pub fn with_unlimited_exponents(&self) -> Self {
        Self {
            has_exponent_range: false,
            ..self.clone()
        }
    }

    pub fn with_exponent_clamp(&self, clamp_normal_exponents: bool) -> Self {
        Self {
            clamp_normal_exponents,
            ..self.clone()
        }
    }

    pub fn with_adjust_exponent(&self, adjust_exponent: bool) -> Self {
        Self {
            adjust_exponent,
            ..self.clone()
        }
    }

    pub fn with_simplified(&self, simplified: bool) -> Self {
        Self {
            simplified,
            ..self.clone()
        }
    }

    // ---------------------------------------------------------------------
    // Range queries
    // ---------------------------------------------------------------------

    /// Check whether `exponent` lies in the context's exponent range.
    ///
    /// Always `true` without an exponent range. With a nonzero precision
    /// and `adjust_exponent`, the lower bound is compared against the
    /// adjusted exponent of a full-precision coefficient
    /// (`exponent + precision - 1`).
    ///
    /// # Returns
    ///
    /// * `Err(ContextError::NullReference)` - `exponent` is `None`
    pub fn exponent_within_range(&self, exponent: Option<&Integer>) -> ContextResult<bool> {
        let exponent = exponent.ok_or(ContextError::NullReference("exponent"))?;
        if !self.has_exponent_range {
            return Ok(true);
        }
        if *exponent > self.e_max {
            return Ok(false);
        }
        if self.adjust_exponent && self.has_max_precision() && !self.precision_in_bits {
            let adjusted = exponent + Integer::from(&self.precision) - Integer::from(1);
            Ok(adjusted >= self.e_min)
        } else {
            Ok(*exponent >= self.e_min)
        }
    }
}

impl Default for ArithmeticContext {
    fn default() -> Self {
        Self::unbounded(Rounding::HalfEven)
    }
}

impl fmt::Display for ArithmeticContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = match self.flags {
            FlagState::Enabled(flags) => flags.to_string(),
            FlagState::Unsupported => "unsupported".to_string(),
        };
        write!(
            f,
            "[ArithmeticContext precision={}{}, rounding={}, e_min={}, e_max={}, \
             has_exponent_range={}, clamp_normal_exponents={}, adjust_exponent={}, \
             simplified={}, flags={}, traps={}]",
            self.precision,
            if self.precision_in_bits { " bits" } else { "" },
            self.rounding,
            self.e_min,
            self.e_max,
            self.has_exponent_range,
            self.clamp_normal_exponents,
            self.adjust_exponent,
            self.simplified,
            flags,
            self.traps,
        )
    }
}

fn natural_precision(precision: i64) -> ContextResult<Natural> {
    u64::try_from(precision)
        .map(Natural::from)
        .map_err(|_| ContextError::InvalidArgument(format!("precision ({}) is less than 0", precision)))
}
