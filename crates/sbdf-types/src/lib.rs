//! # sbdf-types
//!
//! Value model for the Spotfire Binary Data Format (SBDF) version 1.0.
//!
//! This crate defines the closed set of twelve SBDF value types, the tagged
//! scalar value ([`SbdfValue`]), and the byte-level codec for scalars:
//! little-endian fixed-width numbers, UTF-8 strings, opaque binary, the
//! millisecond time bases, and the IEEE-754 decimal128 layout used for the
//! `Currency` type.
//!
//! ## Design Philosophy
//!
//! This crate is intentionally IO-agnostic: scalar encoding targets a
//! [`bytes::BufMut`] and decoding consumes plain byte slices. The framing of
//! those bytes (sections, arrays, metadata blocks) lives in `sbdf-format`;
//! streaming and the table model live in `sbdf`.

pub mod decimal;
pub mod decode;
pub mod encode;
pub mod error;
pub mod time;
pub mod value;
pub mod value_type;

pub use decode::decode_value;
pub use encode::{encode_value, encoded_len};
pub use error::TypeError;
pub use value::SbdfValue;
pub use value_type::ValueType;
