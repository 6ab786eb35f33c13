//! Entities Layer: Utilities
//!
//! Provides utility value types:
//! - Big decimal values (sign, coefficient, exponent, infinities, NaN)
//! - Decimal digit counting for arbitrary precision magnitudes

pub mod decimal;

pub use decimal::{BigDecimal, ParseDecimalError};
