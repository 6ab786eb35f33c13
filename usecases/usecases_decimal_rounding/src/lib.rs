//! Use Cases Layer: Decimal Rounding
//!
//! Rounds big decimal values to an arithmetic context:
//! - Precision fitting in digits or bits, under every rounding mode
//! - Exponent range handling (clamping, subnormals, overflow)
//! - Condition reporting and trap enforcement through the context
//!
//! ## See Also
//!
//! - [`entities_arithmetic_context`](../entities_arithmetic_context/index.html): the context
//! - [`entities_utilities`](../entities_utilities/index.html): `BigDecimal`

pub mod digits;
pub mod round;

pub use round::{round_to_context, round_with_flags, Rounded, RoundingError, RoundingResult};
