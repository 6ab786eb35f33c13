//! Rounding Modes
//!
//! Enumerates the rounding modes an arithmetic context can select. The
//! modes follow the General Decimal Arithmetic naming, plus the two
//! "odd" modes used for double-rounding-safe intermediate results.

use std::fmt;
use std::str::FromStr;

/// Rounding mode applied when a result has more digits than the context allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rounding {
    /// No rounding allowed. A result that needs rounding is invalid.
    None,
    /// Round away from zero.
    Up,
    /// Round toward zero (truncate).
    Down,
    /// Round toward positive infinity.
    Ceiling,
    /// Round toward negative infinity.
    Floor,
    /// Round to nearest, ties away from zero.
    HalfUp,
    /// Round to nearest, ties toward zero.
    HalfDown,
    /// Round to nearest, ties to the even digit.
    #[default]
    HalfEven,
    /// If any digits are discarded and the kept last digit is even, round away from zero.
    Odd,
    /// If any digits are discarded and the kept last digit is 0 or 5, round away from zero.
    ZeroFiveUp,
    /// `Odd` in radix 2, `ZeroFiveUp` in radix 10.
    OddOrZeroFiveUp,
}

impl Rounding {
    /// All rounding modes, in declaration order.
    pub const ALL: [Rounding; 11] = [
        Rounding::None,
        Rounding::Up,
        Rounding::Down,
        Rounding::Ceiling,
        Rounding::Floor,
        Rounding::HalfUp,
        Rounding::HalfDown,
        Rounding::HalfEven,
        Rounding::Odd,
        Rounding::ZeroFiveUp,
        Rounding::OddOrZeroFiveUp,
    ];

    /// Snake-case name of the mode, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Rounding::None => "none",
            Rounding::Up => "up",
            Rounding::Down => "down",
            Rounding::Ceiling => "ceiling",
            Rounding::Floor => "floor",
            Rounding::HalfUp => "half_up",
            Rounding::HalfDown => "half_down",
            Rounding::HalfEven => "half_even",
            Rounding::Odd => "odd",
            Rounding::ZeroFiveUp => "zero_five_up",
            Rounding::OddOrZeroFiveUp => "odd_or_zero_five_up",
        }
    }

    /// Whether an overflowing result rounds to infinity (as opposed to the
    /// largest finite value) for a result of the given sign.
    pub fn overflows_to_infinity(self, negative: bool) -> bool {
        match self {
            Rounding::Up | Rounding::HalfUp | Rounding::HalfDown | Rounding::HalfEven => true,
            Rounding::Ceiling => !negative,
            Rounding::Floor => negative,
            Rounding::None
            | Rounding::Down
            | Rounding::Odd
            | Rounding::ZeroFiveUp
            | Rounding::OddOrZeroFiveUp => false,
        }
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Error returned when parsing an unknown rounding mode name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoundingError(pub String);

impl fmt::Display for ParseRoundingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown rounding mode: {}", self.0)
    }
}

impl std::error::Error for ParseRoundingError {}

impl FromStr for Rounding {
    type Err = ParseRoundingError;

    /// Accepts both the snake-case name (`half_even`) and the variant
    /// name (`HalfEven`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Rounding::ALL
            .iter()
            .copied()
            .find(|mode| mode.name().replace('_', "") == normalized)
            .ok_or_else(|| ParseRoundingError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_half_even() {
        assert_eq!(Rounding::default(), Rounding::HalfEven);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("half_even".parse::<Rounding>().unwrap(), Rounding::HalfEven);
        assert_eq!("HalfEven".parse::<Rounding>().unwrap(), Rounding::HalfEven);
        assert_eq!("zero-five-up".parse::<Rounding>().unwrap(), Rounding::ZeroFiveUp);
        assert_eq!("FLOOR".parse::<Rounding>().unwrap(), Rounding::Floor);
        assert!("sideways".parse::<Rounding>().is_err());
    }

    #[test]
    fn test_parse_every_name_and_display() {
        for mode in Rounding::ALL {
            assert_eq!(mode.name().parse::<Rounding>().unwrap(), mode);
            assert_eq!(mode.to_string().parse::<Rounding>().unwrap(), mode);
        }
    }

    #[test]
    fn test_overflow_direction() {
        assert!(Rounding::HalfEven.overflows_to_infinity(true));
        assert!(Rounding::Ceiling.overflows_to_infinity(false));
        assert!(!Rounding::Ceiling.overflows_to_infinity(true));
        assert!(Rounding::Floor.overflows_to_infinity(true));
        assert!(!Rounding::Down.overflows_to_infinity(false));
    }
}
