//! VarInt Codec Module
//!
//! Provides stream encoding and decoding of unsigned arbitrary precision
//! integers as variable-length byte sequences (7 data bits per byte).
//!
//! ## Usage
//!
//! ```rust
//! use infrastructure_bignum_encoding::VarIntCodec;
//! use malachite::{Integer, Natural};
//!
//! let mut out = Vec::new();
//! VarIntCodec::encode(&mut out, &Integer::from(300)).unwrap();
//! assert_eq!(out, vec![0xac, 0x02]);
//!
//! let value = VarIntCodec::decode(&mut out.as_slice(), None).unwrap();
//! assert_eq!(value, Natural::from(300u32));
//! ```

use std::io::{Read, Write};

use malachite::base::num::basic::traits::Zero;
use malachite::base::num::logic::traits::SignificantBits;
use malachite::{Integer, Natural};
use tracing::trace;

use crate::common::{
    group_bytes, split_low_group, DecodeError, EncodeError, CHUNK_MASK, CONTINUATION, GROUP_BITS,
    GROUP_BYTES,
};

/// Variable-length unsigned integer codec
pub struct VarIntCodec;

impl VarIntCodec {
    /// Encode a non-negative integer to `output`.
    ///
    /// # Arguments
    ///
    /// * `output` - Byte sink
    /// * `value` - Value to encode
    ///
    /// # Returns
    ///
    /// * `Ok(bytes_written)` - Number of bytes written
    /// * `Err(EncodeError::NegativeValue)` - `value` is negative
    /// * `Err(EncodeError::Io)` - The sink failed
    pub fn encode<W: Write + ?Sized>(output: &mut W, value: &Integer) -> Result<usize, EncodeError> {
        if *value < 0 {
            return Err(EncodeError::NegativeValue);
        }
        Self::encode_natural(output, value.unsigned_abs_ref())
    }

    /// Encode a magnitude to `output`.
    pub fn encode_natural<W: Write + ?Sized>(
        output: &mut W,
        value: &Natural,
    ) -> Result<usize, EncodeError> {
        let mut written = 0;
        let mut remaining = value.clone();
        loop {
            let (group, high) = split_low_group(&remaining);
            let last = high == 0u32;
            let (bytes, len) = group_bytes(group, last);
            output.write_all(&bytes[..len])?;
            written += len;
            if last {
                return Ok(written);
            }
            remaining = high;
        }
    }

    /// Encode into a new byte vector.
    pub fn encode_to_vec(value: &Integer) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::with_capacity(value.unsigned_abs_ref().significant_bits() as usize / 7 + 1);
        Self::encode(&mut out, value)?;
        Ok(out)
    }

    /// Number of bytes [`encode_natural`](Self::encode_natural) writes for `value`.
    pub fn encoded_len(value: &Natural) -> usize {
        let bits = value.significant_bits();
        let groups = bits / GROUP_BITS;
        let rest = bits % GROUP_BITS;
        if bits == 0 {
            1
        } else if rest == 0 {
            // top group is a full 28 bits and takes 4 bytes
            groups as usize * GROUP_BYTES
        } else {
            (groups as usize) * GROUP_BYTES + rest.div_ceil(7) as usize
        }
    }

    /// Decode a value from `input`.
    ///
    /// Reads until a byte without the continuation bit. With a
    /// non-negative `max_value`, fails as soon as the running value
    /// exceeds it; `None` or a negative maximum disables the check.
    ///
    /// # Returns
    ///
    /// * `Ok(value)` - Decoded value
    /// * `Err(DecodeError::EndOfStream)` - The stream ended mid-value
    /// * `Err(DecodeError::ValueTooHigh)` - The value exceeds `max_value`
    /// * `Err(DecodeError::Io)` - The source failed
    pub fn decode<R: Read + ?Sized>(
        input: &mut R,
        max_value: Option<&Integer>,
    ) -> Result<Natural, DecodeError> {
        let max_value = max_value.and_then(|max| Natural::try_from(max).ok());
        let mut value = Natural::ZERO;
        let mut shift = 0u64;
        let mut byte = [0u8; 1];
        loop {
            let mut group = 0u32;
            let mut done = false;
            for i in 0..GROUP_BYTES {
                input.read_exact(&mut byte)?;
                group |= u32::from(byte[0] & CHUNK_MASK) << (7 * i);
                if byte[0] & CONTINUATION == 0 {
                    done = true;
                    break;
                }
            }
            value += Natural::from(group) << shift;
            if let Some(max) = &max_value {
                if value > *max {
                    return Err(DecodeError::ValueTooHigh);
                }
            }
            if done {
                trace!(groups = shift / GROUP_BITS + 1, "decoded varint");
                return Ok(value);
            }
            shift += GROUP_BITS;
        }
    }

    /// Decode a value from the front of `data`.
    ///
    /// # Returns
    ///
    /// * `Ok((value, bytes_consumed))` - Decoded value and bytes consumed
    pub fn decode_from_slice(
        data: &[u8],
        max_value: Option<&Integer>,
    ) -> Result<(Natural, usize), DecodeError> {
        let mut cursor = data;
        let value = Self::decode(&mut cursor, max_value)?;
        Ok((value, data.len() - cursor.len()))
    }
}
