//! Common Encoding/Decoding Utilities
//!
//! Provides the error types shared by the codec and the helpers that split
//! a magnitude into 28-bit groups and a group into 7-bit chunks.
//!
//! ## Encoding Format
//!
//! A value is written as 7-bit chunks, least significant first. Every
//! byte except the last carries the continuation bit `0x80`. The decoder
//! reads up to four bytes (28 bits) per group and shifts each further
//! group left by another 28 bits.
//!
//! | Group value          | Bytes (no further group)              |
//! |----------------------|---------------------------------------|
//! | `<= 0x7f`            | `c0`                                  |
//! | `<= 0x3fff`          | `0x80\|c0, c1`                        |
//! | `<= 0x1fffff`        | `0x80\|c0, 0x80\|c1, c2`              |
//! | `<= 0xfffffff`       | `0x80\|c0, 0x80\|c1, 0x80\|c2, c3`    |
//!
//! A group followed by another group always takes four bytes, all with
//! the continuation bit set.

use std::io;

use malachite::Natural;

/// Continuation bit
pub(crate) const CONTINUATION: u8 = 0x80;

/// Data bits of a byte
pub(crate) const CHUNK_MASK: u8 = 0x7f;

/// Bits per group
pub(crate) const GROUP_BITS: u64 = 28;

/// Bytes per full group
pub(crate) const GROUP_BYTES: usize = 4;

const GROUP_MASK: u32 = 0x0fff_ffff;

/// Encoding errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Only non-negative values can be encoded
    NegativeValue,
    /// The output stream failed
    Io(io::ErrorKind, String),
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::NegativeValue => write!(f, "Value is negative"),
            EncodeError::Io(kind, msg) => write!(f, "I/O error ({:?}): {}", kind, msg),
        }
    }
}

impl std::error::Error for EncodeError {}

impl From<io::Error> for EncodeError {
    fn from(e: io::Error) -> Self {
        EncodeError::Io(e.kind(), e.to_string())
    }
}

/// Decoding errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The stream ended before a byte without the continuation bit
    EndOfStream,
    /// The value exceeds the caller's maximum
    ValueTooHigh,
    /// The input stream failed
    Io(io::ErrorKind, String),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::EndOfStream => write!(f, "End of stream"),
            DecodeError::ValueTooHigh => write!(f, "Value read is too high"),
            DecodeError::Io(kind, msg) => write!(f, "I/O error ({:?}): {}", kind, msg),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<io::Error> for DecodeError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => DecodeError::EndOfStream,
            kind => DecodeError::Io(kind, e.to_string()),
        }
    }
}

/// Split `value` into its lowest 28-bit group and the remaining high part.
pub(crate) fn split_low_group(value: &Natural) -> (u32, Natural) {
    let low = value & Natural::from(GROUP_MASK);
    // masked to 28 bits, always fits
    let low = u32::try_from(&low).unwrap_or(GROUP_MASK);
    (low, value >> GROUP_BITS)
}

/// Bytes of one group. `last` groups use the shortest form; other groups
/// use all four bytes with the continuation bit set.
pub(crate) fn group_bytes(group: u32, last: bool) -> ([u8; GROUP_BYTES], usize) {
    let len = if !last {
        GROUP_BYTES
    } else if group <= 0x7f {
        1
    } else if group <= 0x3fff {
        2
    } else if group <= 0x1f_ffff {
        3
    } else {
        4
    };
    let mut bytes = [0u8; GROUP_BYTES];
    for (i, byte) in bytes.iter_mut().enumerate().take(len) {
        let chunk = ((group >> (7 * i)) as u8) & CHUNK_MASK;
        *byte = if i + 1 < len || !last {
            chunk | CONTINUATION
        } else {
            chunk
        };
    }
    (bytes, len)
}
