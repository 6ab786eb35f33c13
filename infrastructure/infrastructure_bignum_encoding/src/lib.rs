//! Infrastructure Layer: Bignum Encoding
//!
//! Provides stream encoding and decoding of arbitrary precision unsigned
//! integers, used to serialize big-integer magnitudes.
//!
//! ## Codecs
//!
//! - **[`varint_codec`](varint_codec/index.html)**: Variable-length codec with
//!   7 data bits per byte and a continuation bit, decoded in 28-bit groups.
//!
//! ## Architecture
//!
//! The codec works over any `std::io::Read` / `std::io::Write`, so callers
//! choose the buffering and blocking behavior. It depends only on
//! `malachite` for the integer types.

mod common;

pub mod varint_codec;

pub use varint_codec::VarIntCodec;

// Re-export error types for convenience
pub use common::{DecodeError, EncodeError};
