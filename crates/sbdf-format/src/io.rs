//! Primitive IO for the SBDF wire format.
//!
//! Reads pull from any [`Read`] implementation via `byteorder`; writes append
//! to a [`BufMut`] scratch buffer. Length prefixes are signed 32-bit
//! little-endian and negative values are a hard error.

use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use bytes::BufMut;

use crate::error::FormatError;

/// Read a single byte.
pub fn read_u8(r: &mut impl Read) -> Result<u8, FormatError> {
    Ok(ReadBytesExt::read_u8(r)?)
}

/// Read a signed 32-bit little-endian integer.
pub fn read_i32(r: &mut impl Read) -> Result<i32, FormatError> {
    Ok(r.read_i32::<LittleEndian>()?)
}

/// Read a signed 32-bit length prefix, rejecting negative values.
pub fn read_len(r: &mut impl Read) -> Result<usize, FormatError> {
    let len = read_i32(r)?;
    usize::try_from(len).map_err(|_| FormatError::InvalidElementCount)
}

/// Read exactly `n` bytes.
///
/// The buffer grows with the data actually read, so a hostile length prefix
/// on a truncated stream fails with EOF instead of a giant allocation.
pub fn read_bytes(r: &mut impl Read, n: usize) -> Result<Vec<u8>, FormatError> {
    let mut buf = Vec::new();
    r.take(n as u64).read_to_end(&mut buf)?;
    if buf.len() != n {
        return Err(FormatError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "short read",
        )));
    }
    Ok(buf)
}

/// Read a length-prefixed UTF-8 string.
pub fn read_string(r: &mut impl Read) -> Result<String, FormatError> {
    let len = read_len(r)?;
    let bytes = read_bytes(r, len)?;
    Ok(String::from_utf8(bytes).map_err(sbdf_types::TypeError::from)?)
}

/// Read a 7-bit packed unsigned integer.
///
/// Seven bits per byte, least-significant group first, high bit set while
/// more bytes follow.
pub fn read_7bit_u32(r: &mut impl Read) -> Result<u32, FormatError> {
    let mut value: u64 = 0;
    let mut shift = 0u32;
    loop {
        let byte = read_u8(r)?;
        value |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            break;
        }
        shift += 7;
        if shift > 28 {
            return Err(FormatError::InvalidElementCount);
        }
    }
    u32::try_from(value).map_err(|_| FormatError::InvalidElementCount)
}

/// Discard `n` bytes from the stream without requiring `Seek`.
pub fn skip_bytes(r: &mut impl Read, n: u64) -> Result<(), FormatError> {
    let copied = io::copy(&mut r.take(n), &mut io::sink())?;
    if copied != n {
        return Err(FormatError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "short read while skipping",
        )));
    }
    Ok(())
}

/// Append a signed 32-bit little-endian length prefix.
pub fn put_len(buf: &mut impl BufMut, len: usize) -> Result<(), FormatError> {
    let len = i32::try_from(len).map_err(|_| FormatError::InvalidElementCount)?;
    buf.put_i32_le(len);
    Ok(())
}

/// Append a length-prefixed UTF-8 string.
pub fn put_string(buf: &mut impl BufMut, s: &str) -> Result<(), FormatError> {
    put_len(buf, s.len())?;
    buf.put_slice(s.as_bytes());
    Ok(())
}

/// Append a 7-bit packed unsigned integer.
pub fn put_7bit_u32(buf: &mut impl BufMut, mut value: u32) {
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        buf.put_u8(byte);
        if value == 0 {
            break;
        }
    }
}

/// Encoded length of a 7-bit packed unsigned integer.
#[must_use]
pub const fn packed_7bit_len(value: u32) -> usize {
    if value < 1 << 7 {
        1
    } else if value < 1 << 14 {
        2
    } else if value < 1 << 21 {
        3
    } else if value < 1 << 28 {
        4
    } else {
        5
    }
}
