//! Condition Flags
//!
//! Conditions signaled by arithmetic operations. The same bit set serves
//! both as the sticky flags recorded on a context and as the trap mask
//! that turns a condition into an error.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Bit set of arithmetic conditions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: u32 {
        /// Nonzero digits were discarded.
        const INEXACT = 1;
        /// Digits were discarded, zero or not.
        const ROUNDED = 2;
        /// The adjusted exponent fell below the minimum exponent.
        const SUBNORMAL = 4;
        /// The result is subnormal and inexact.
        const UNDERFLOW = 8;
        /// The result exceeds the maximum exponent.
        const OVERFLOW = 16;
        /// The exponent was altered to fit the exponent range.
        const CLAMPED = 32;
        /// The operation had no valid result.
        const INVALID = 64;
        /// Division of a finite nonzero number by zero.
        const DIVIDE_BY_ZERO = 128;
        /// Operand digits beyond the precision were discarded.
        const LOST_DIGITS = 256;
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "0");
        }
        bitflags::parser::to_writer(self, f)
    }
}
