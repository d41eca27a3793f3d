//! # sbdf-format
//!
//! Pure implementation of the SBDF (Spotfire Binary Data Format) 1.0 wire
//! format: section framing, primitive IO, typed object arrays, the three
//! value-array encodings, metadata blocks, table metadata, and column/table
//! slices.
//!
//! ## Design Philosophy
//!
//! Decoding streams from any [`std::io::Read`] without requiring `Seek`;
//! encoding targets [`bytes::BufMut`] scratch buffers so callers can
//! materialize a whole section before a single write to the underlying
//! stream. This crate knows nothing about tables as a whole — assembling
//! columns, slicing rows, and type inference live in the `sbdf` crate.

pub mod array;
pub mod bits;
pub mod error;
pub mod file_header;
pub mod io;
pub mod metadata;
pub mod object;
pub mod section;
pub mod slice;
pub mod table_metadata;

pub use array::{ValueArray, ValueArrayEncoding};
pub use bits::BitArray;
pub use error::FormatError;
pub use metadata::{Metadata, MetadataEntry};
pub use section::SectionId;
pub use slice::{ColumnSlice, TableSlice};
pub use table_metadata::TableMetadata;
