//! Value arrays: the three on-disk encodings of a typed sequence.
//!
//! Every value array opens with `u8 encoding, u8 value_type`. Plain arrays
//! delegate to the object codec; bit arrays pack booleans MSB-first; the
//! run-length encoding is parsed and skippable but never produced, and its
//! values cannot be materialized yet.

use std::io::Read;

use bytes::BufMut;

use sbdf_types::{SbdfValue, TypeError, ValueType};

use crate::bits::BitArray;
use crate::error::FormatError;
use crate::io;
use crate::object;

/// Wire identifiers of the value-array encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ValueArrayEncoding {
    /// Count-prefixed sequence of plain elements.
    Plain = 0x1,
    /// Run-length compressed sequence.
    RunLength = 0x2,
    /// MSB-first packed bits.
    Bit = 0x3,
}

impl ValueArrayEncoding {
    /// Create an encoding from its wire id.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x1 => Some(Self::Plain),
            0x2 => Some(Self::RunLength),
            0x3 => Some(Self::Bit),
            _ => None,
        }
    }
}

/// A homogeneously-typed sequence in one of the three encodings.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueArray {
    /// Plain encoding: the values as-is.
    Plain {
        /// Element type of the sequence.
        value_type: ValueType,
        /// The decoded elements.
        values: Vec<SbdfValue>,
    },
    /// Bit encoding; the element type is always boolean.
    Bit(BitArray),
    /// Run-length encoding, kept structural. Decode hook for later; the
    /// writer never constructs this variant.
    RunLength {
        /// Element type of the run values.
        value_type: ValueType,
        /// Logical row count (sum of all run lengths).
        row_count: u32,
        /// Per-run lengths.
        run_lengths: Vec<u8>,
        /// One value per run.
        run_values: Vec<SbdfValue>,
    },
}

impl ValueArray {
    /// Build a plain array after checking every element carries `value_type`.
    pub fn plain(value_type: ValueType, values: Vec<SbdfValue>) -> Result<Self, FormatError> {
        for value in &values {
            if value.value_type() != value_type {
                return Err(FormatError::Type(TypeError::incompatible(value, value_type)));
            }
        }
        Ok(Self::Plain { value_type, values })
    }

    /// Build a bit array from booleans.
    #[must_use]
    pub fn bit_from_bools(bools: &[bool]) -> Self {
        Self::Bit(BitArray::from_bools(bools))
    }

    /// The wire encoding id of this array.
    #[must_use]
    pub fn encoding(&self) -> ValueArrayEncoding {
        match self {
            Self::Plain { .. } => ValueArrayEncoding::Plain,
            Self::Bit(_) => ValueArrayEncoding::Bit,
            Self::RunLength { .. } => ValueArrayEncoding::RunLength,
        }
    }

    /// The element type of this array.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Plain { value_type, .. } | Self::RunLength { value_type, .. } => *value_type,
            Self::Bit(_) => ValueType::Bool,
        }
    }

    /// The number of logical rows this array represents.
    #[must_use]
    pub fn row_count(&self) -> usize {
        match self {
            Self::Plain { values, .. } => values.len(),
            Self::Bit(bits) => bits.len(),
            Self::RunLength { row_count, .. } => *row_count as usize,
        }
    }

    /// Materialize the rows as scalars.
    ///
    /// Bit arrays expand to booleans; run-length arrays fail with
    /// [`FormatError::RunLengthUnsupported`].
    pub fn values(&self) -> Result<Vec<SbdfValue>, FormatError> {
        match self {
            Self::Plain { values, .. } => Ok(values.clone()),
            Self::Bit(bits) => Ok(bits.iter().map(SbdfValue::Bool).collect()),
            Self::RunLength { .. } => Err(FormatError::RunLengthUnsupported),
        }
    }

    /// Append this array to `buf`.
    pub fn write(&self, buf: &mut impl BufMut) -> Result<(), FormatError> {
        buf.put_u8(self.encoding() as u8);
        buf.put_u8(self.value_type() as u8);
        match self {
            Self::Plain { value_type, values } => object::write_array(buf, *value_type, values)?,
            Self::Bit(bits) => {
                io::put_len(buf, bits.len())?;
                buf.put_slice(bits.as_bytes());
            }
            // the writer never produces RLE
            Self::RunLength { .. } => return Err(FormatError::RunLengthUnsupported),
        }
        Ok(())
    }

    /// Read one value array.
    pub fn read(r: &mut impl Read) -> Result<Self, FormatError> {
        let encoding = io::read_u8(r)?;
        let encoding =
            ValueArrayEncoding::from_u8(encoding).ok_or(FormatError::UnknownEncoding(encoding))?;
        let type_id = io::read_u8(r)?;
        let value_type =
            ValueType::from_u8(type_id).ok_or(FormatError::Type(TypeError::UnknownTypeId(type_id)))?;
        match encoding {
            ValueArrayEncoding::Plain => Ok(Self::Plain {
                value_type,
                values: object::read_array(r, value_type)?,
            }),
            ValueArrayEncoding::RunLength => {
                let row_count =
                    u32::try_from(io::read_i32(r)?).map_err(|_| FormatError::InvalidElementCount)?;
                let run_lengths = read_run_lengths(r)?;
                let run_values = object::read_array(r, value_type)?;
                Ok(Self::RunLength {
                    value_type,
                    row_count,
                    run_lengths,
                    run_values,
                })
            }
            ValueArrayEncoding::Bit => {
                let bit_count = io::read_len(r)?;
                let bytes = io::read_bytes(r, bit_count.div_ceil(8))?;
                Ok(Self::Bit(BitArray::from_packed(bytes, bit_count)))
            }
        }
    }

    /// Skip one value array without materializing it.
    pub fn skip(r: &mut impl Read) -> Result<(), FormatError> {
        let encoding = io::read_u8(r)?;
        let encoding =
            ValueArrayEncoding::from_u8(encoding).ok_or(FormatError::UnknownEncoding(encoding))?;
        let type_id = io::read_u8(r)?;
        let value_type =
            ValueType::from_u8(type_id).ok_or(FormatError::Type(TypeError::UnknownTypeId(type_id)))?;
        match encoding {
            ValueArrayEncoding::Plain => object::skip_array(r, value_type),
            ValueArrayEncoding::RunLength => {
                let _ = io::read_i32(r)?;
                object::skip_array(r, ValueType::InternalByte)?;
                object::skip_array(r, value_type)
            }
            ValueArrayEncoding::Bit => {
                let bit_count = io::read_len(r)?;
                io::skip_bytes(r, bit_count.div_ceil(8) as u64)
            }
        }
    }
}

/// Read the `InternalByte` plain-array of per-run lengths.
fn read_run_lengths(r: &mut impl Read) -> Result<Vec<u8>, FormatError> {
    let count = io::read_len(r)?;
    io::read_bytes(r, count)
}
