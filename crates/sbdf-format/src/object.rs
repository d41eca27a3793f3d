//! Typed object reader/writer.
//!
//! An "object" is a single scalar or a homogeneously-typed sequence whose
//! value type is already known from context. Sequences embedded in plain
//! value arrays use 7-bit packed per-element lengths behind a total-byte
//! prefix; bare scalars (metadata values) use plain `u32` lengths.

use std::io::Read;

use bytes::{BufMut, BytesMut};

use sbdf_types::{SbdfValue, TypeError, ValueType, decode_value, encode_value, encoded_len};

use crate::error::FormatError;
use crate::io;

/// Append a homogeneous array of `declared`-typed values.
///
/// Layout: `u32 count`, then for array element types a `u32` total byte size
/// followed by 7-bit-packed-length-prefixed elements, or the packed elements
/// back to back for fixed-size types.
pub fn write_array(
    buf: &mut impl BufMut,
    declared: ValueType,
    values: &[SbdfValue],
) -> Result<(), FormatError> {
    io::put_len(buf, values.len())?;
    write_n(buf, declared, values, true)
}

/// Append a single bare scalar (no count, `u32` length prefix if variable).
pub fn write_scalar(
    buf: &mut impl BufMut,
    declared: ValueType,
    value: &SbdfValue,
) -> Result<(), FormatError> {
    write_n(buf, declared, std::slice::from_ref(value), false)
}

fn write_n(
    buf: &mut impl BufMut,
    declared: ValueType,
    values: &[SbdfValue],
    packed: bool,
) -> Result<(), FormatError> {
    if declared.is_array() {
        if packed {
            let mut total = 0usize;
            for value in values {
                let len = encoded_len(value, declared)?;
                let len32 = u32::try_from(len).map_err(|_| FormatError::InvalidElementCount)?;
                total += io::packed_7bit_len(len32) + len;
            }
            io::put_len(buf, total)?;
            for value in values {
                let len = encoded_len(value, declared)?;
                io::put_7bit_u32(buf, len as u32);
                encode_value(value, declared, buf)?;
            }
        } else {
            for value in values {
                let len = encoded_len(value, declared)?;
                io::put_len(buf, len)?;
                encode_value(value, declared, buf)?;
            }
        }
    } else {
        for value in values {
            encode_value(value, declared, buf)?;
        }
    }
    Ok(())
}

/// Read a homogeneous array of `declared`-typed values.
pub fn read_array(r: &mut impl Read, declared: ValueType) -> Result<Vec<SbdfValue>, FormatError> {
    let count = io::read_len(r)?;
    read_n(r, declared, count, true)
}

/// Read a single bare scalar.
pub fn read_scalar(r: &mut impl Read, declared: ValueType) -> Result<SbdfValue, FormatError> {
    let mut values = read_n(r, declared, 1, false)?;
    values.pop().ok_or(FormatError::InvalidElementCount)
}

fn read_n(
    r: &mut impl Read,
    declared: ValueType,
    count: usize,
    packed: bool,
) -> Result<Vec<SbdfValue>, FormatError> {
    let mut values = Vec::with_capacity(count.min(1 << 16));
    if declared.is_array() {
        if packed {
            // total byte size; per-element lengths make it redundant
            let _ = io::read_len(r)?;
        }
        for _ in 0..count {
            let len = if packed {
                io::read_7bit_u32(r)? as usize
            } else {
                io::read_len(r)?
            };
            let data = io::read_bytes(r, len)?;
            values.push(decode_value(declared, &data)?);
        }
    } else {
        let size = declared
            .packed_size()
            .ok_or(FormatError::Type(TypeError::UnknownTypeId(declared as u8)))?;
        // fixed-size elements arrive as one block
        let block = io::read_bytes(r, size * count)?;
        for chunk in block.chunks_exact(size) {
            values.push(decode_value(declared, chunk)?);
        }
    }
    Ok(values)
}

/// Skip a homogeneous array without decoding its elements.
pub fn skip_array(r: &mut impl Read, declared: ValueType) -> Result<(), FormatError> {
    let count = io::read_len(r)?;
    if declared.is_array() {
        let total = io::read_len(r)?;
        io::skip_bytes(r, total as u64)
    } else {
        let size = declared
            .packed_size()
            .ok_or(FormatError::Type(TypeError::UnknownTypeId(declared as u8)))?;
        io::skip_bytes(r, (size * count) as u64)
    }
}

/// Encode a whole fixed-type array into a reusable scratch and return it.
///
/// Convenience for benchmarks and tests; production paths write straight
/// into the caller's scratch buffer.
pub fn encode_array(declared: ValueType, values: &[SbdfValue]) -> Result<BytesMut, FormatError> {
    let mut buf = BytesMut::new();
    write_array(&mut buf, declared, values)?;
    Ok(buf)
}
