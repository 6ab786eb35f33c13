//! Entities Layer: Arithmetic Context
//!
//! Provides the configuration consumed by decimal arithmetic:
//! - Precision (digits or bits) and rounding mode
//! - Exponent range, clamping and adjusted-exponent handling
//! - Condition flags and traps
//! - Named presets (unlimited, CLI decimal, IEEE decimal formats)
//!
//! ## See Also
//!
//! - [`entities_utilities`](../entities_utilities/index.html): `BigDecimal` values
//! - [`usecases_decimal_rounding`](../usecases_decimal_rounding/index.html): rounding a value to a context

pub mod context;
pub mod flags;
pub mod presets;
pub mod rounding;

pub use context::{ArithmeticContext, ContextError, ContextResult, FlagState};
pub use flags::Flags;
pub use rounding::{ParseRoundingError, Rounding};
