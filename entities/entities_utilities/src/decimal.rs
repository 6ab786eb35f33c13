//! Big Decimal Values
//!
//! Provides an arbitrary precision decimal floating-point value: a sign,
//! a non-negative coefficient and a signed exponent, plus the infinities
//! and NaN.
//!
//! # Purpose
//!
//! The value type is what a decimal engine rounds to an arithmetic
//! context. It keeps trailing zeros (`1.20` and `1.2` are distinct
//! values with equal magnitude) and signed zeros, so rounding can report
//! exactly which digits it dropped.
//!
//! # String Forms
//!
//! Parsing accepts `[+-]digits[.digits][(E|e)[+-]digits]`, `Infinity`,
//! `Inf` and `NaN` (case-insensitive). Display follows the scientific
//! string rules: plain notation when the exponent is at most 0 and the
//! adjusted exponent is at least -6, exponential notation otherwise.
//!
//! ```rust
//! use entities_utilities::BigDecimal;
//!
//! let d: BigDecimal = "-12.50".parse().unwrap();
//! assert_eq!(d.to_string(), "-12.50");
//! assert_eq!("1E+3".parse::<BigDecimal>().unwrap().to_string(), "1E+3");
//! ```

/*
 * %CopyrightBegin%
 *
 * SPDX-License-Identifier: Apache-2.0
 *
 * Copyright Lee Barney 2025. All Rights Reserved.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 * %CopyrightEnd%
 */

use std::fmt;
use std::str::FromStr;

use malachite::base::num::basic::traits::Zero;
use malachite::{Integer, Natural};

/// Arbitrary precision decimal value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BigDecimal {
    /// `(-1)^negative * coefficient * 10^exponent`
    Finite {
        negative: bool,
        coefficient: Natural,
        exponent: Integer,
    },
    /// Positive or negative infinity
    Infinite { negative: bool },
    /// Quiet not-a-number
    NaN,
}

impl BigDecimal {
    /// Create a finite value.
    pub fn finite(negative: bool, coefficient: Natural, exponent: Integer) -> Self {
        BigDecimal::Finite {
            negative,
            coefficient,
            exponent,
        }
    }

    /// Create a finite value from a signed coefficient.
    pub fn from_integer(coefficient: &Integer, exponent: i64) -> Self {
        BigDecimal::Finite {
            negative: *coefficient < 0,
            coefficient: coefficient.unsigned_abs_ref().clone(),
            exponent: Integer::from(exponent),
        }
    }

    /// Positive zero with exponent 0.
    pub fn zero() -> Self {
        BigDecimal::finite(false, Natural::ZERO, Integer::ZERO)
    }

    pub fn infinity(negative: bool) -> Self {
        BigDecimal::Infinite { negative }
    }

    pub fn nan() -> Self {
        BigDecimal::NaN
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, BigDecimal::Finite { .. })
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, BigDecimal::Infinite { .. })
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, BigDecimal::NaN)
    }

    /// Sign bit. NaN reports `false`.
    pub fn is_negative(&self) -> bool {
        match self {
            BigDecimal::Finite { negative, .. } | BigDecimal::Infinite { negative } => *negative,
            BigDecimal::NaN => false,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, BigDecimal::Finite { coefficient, .. } if *coefficient == 0u32)
    }

    pub fn coefficient(&self) -> Option<&Natural> {
        match self {
            BigDecimal::Finite { coefficient, .. } => Some(coefficient),
            _ => None,
        }
    }

    pub fn exponent(&self) -> Option<&Integer> {
        match self {
            BigDecimal::Finite { exponent, .. } => Some(exponent),
            _ => None,
        }
    }

    /// Number of decimal digits in the coefficient; zero has one digit.
    pub fn digit_count(&self) -> Option<u64> {
        self.coefficient().map(digit_count)
    }

    /// Exponent of the most significant digit: `exponent + digits - 1`.
    pub fn adjusted_exponent(&self) -> Option<Integer> {
        match self {
            BigDecimal::Finite {
                coefficient,
                exponent,
                ..
            } => Some(exponent + Integer::from(digit_count(coefficient)) - Integer::from(1)),
            _ => None,
        }
    }
}

/// Number of decimal digits in `n`; zero has one digit.
pub fn digit_count(n: &Natural) -> u64 {
    n.to_string().len() as u64
}

/// Decimal parsing errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseDecimalError {
    /// Input was empty
    Empty,
    /// Input does not follow the decimal syntax
    InvalidSyntax(String),
}

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseDecimalError::Empty => write!(f, "Empty decimal string"),
            ParseDecimalError::InvalidSyntax(s) => write!(f, "Invalid decimal syntax: {}", s),
        }
    }
}

impl std::error::Error for ParseDecimalError {}

impl FromStr for BigDecimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseDecimalError::Empty);
        }
        let invalid = || ParseDecimalError::InvalidSyntax(s.to_string());

        let (negative, body) = match s.as_bytes()[0] {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };

        if body.eq_ignore_ascii_case("infinity") || body.eq_ignore_ascii_case("inf") {
            return Ok(BigDecimal::Infinite { negative });
        }
        if body.eq_ignore_ascii_case("nan") {
            return Ok(BigDecimal::NaN);
        }

        let (mantissa, exponent_part) = match body.find(|c: char| c == 'e' || c == 'E') {
            Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
            None => (body, None),
        };
        let (int_digits, frac_digits) = match mantissa.find('.') {
            Some(pos) => (&mantissa[..pos], &mantissa[pos + 1..]),
            None => (mantissa, ""),
        };
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (int_digits.is_empty() && frac_digits.is_empty())
            || !all_digits(int_digits)
            || !all_digits(frac_digits)
        {
            return Err(invalid());
        }

        let mut exponent = match exponent_part {
            Some(text) => {
                let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
                if unsigned.is_empty() || !all_digits(unsigned) {
                    return Err(invalid());
                }
                Integer::from_str(text.strip_prefix('+').unwrap_or(text)).map_err(|_| invalid())?
            }
            None => Integer::ZERO,
        };
        exponent -= Integer::from(frac_digits.len() as u64);

        let digits = format!("{}{}", int_digits, frac_digits);
        let coefficient = Natural::from_str(&digits).map_err(|_| invalid())?;

        Ok(BigDecimal::Finite {
            negative,
            coefficient,
            exponent,
        })
    }
}

impl fmt::Display for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (negative, coefficient, exponent) = match self {
            BigDecimal::NaN => return write!(f, "NaN"),
            BigDecimal::Infinite { negative } => {
                return write!(f, "{}Infinity", if *negative { "-" } else { "" });
            }
            BigDecimal::Finite {
                negative,
                coefficient,
                exponent,
            } => (*negative, coefficient, exponent),
        };

        if negative {
            write!(f, "-")?;
        }
        let digits = coefficient.to_string();
        let adjusted = exponent + Integer::from(digits.len() as u64) - Integer::from(1);

        if *exponent <= 0 && adjusted >= -6 {
            if *exponent == 0 {
                return write!(f, "{}", digits);
            }
            // -exponent fits: adjusted >= -6 bounds it by digits.len() + 6
            let scale = usize::try_from(&-exponent).unwrap_or(usize::MAX);
            if scale < digits.len() {
                let (int_part, frac_part) = digits.split_at(digits.len() - scale);
                write!(f, "{}.{}", int_part, frac_part)
            } else {
                write!(f, "0.{}{}", "0".repeat(scale - digits.len()), digits)
            }
        } else {
            let (first, rest) = digits.split_at(1);
            write!(f, "{}", first)?;
            if !rest.is_empty() {
                write!(f, ".{}", rest)?;
            }
            if adjusted >= 0 {
                write!(f, "E+{}", adjusted)
            } else {
                write!(f, "E{}", adjusted)
            }
        }
    }
}
