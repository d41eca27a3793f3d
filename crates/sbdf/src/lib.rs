//! # sbdf
//!
//! Read and write Spotfire Binary Data Format (SBDF) version 1.0 files.
//!
//! SBDF is a sectioned, column-oriented binary container for tabular data
//! with strongly-typed cells, per-cell validity masks, and key/value
//! metadata on both the table and each column. This crate provides the
//! in-memory [`Table`]/[`Column`] model, the streaming [`TableReader`] and
//! [`TableWriter`], Spotfire type inference with integer promotion, and the
//! [`ColumnSource`] adapter for host data-frame containers.
//!
//! The codec is single-threaded and synchronous per file: a reader or
//! writer owns its stream exclusively from open to close, and independent
//! files can be processed from independent threads.
//!
//! ## Example
//!
//! ```
//! use sbdf::{Column, SbdfValue, Table, ValueType, read_sbdf, write_sbdf};
//!
//! # fn main() -> Result<(), sbdf::SbdfError> {
//! let column = Column::new(
//!     "answer",
//!     ValueType::Int,
//!     vec![Some(SbdfValue::Int(42)), None],
//! );
//! let table = Table::new(vec![column])?;
//!
//! let mut buffer = Vec::new();
//! write_sbdf(&mut buffer, &table)?;
//!
//! let restored = read_sbdf(std::io::Cursor::new(buffer))?;
//! assert_eq!(restored.column("answer").and_then(|c| c.get(0)), Some(&SbdfValue::Int(42)));
//! assert_eq!(restored.column("answer").and_then(|c| c.get(1)), None);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod error;
pub mod infer;
pub mod reader;
pub mod table;
pub mod writer;

pub use adapter::ColumnSource;
pub use error::SbdfError;
pub use infer::{infer_from_dtype, infer_value_type};
pub use reader::{TableReader, read_sbdf};
pub use table::{Column, Table};
pub use writer::{SLICE_ROW_COUNT, TableWriter, write_sbdf};

pub use sbdf_format::{BitArray, Metadata, MetadataEntry};
pub use sbdf_types::{SbdfValue, TypeError, ValueType};
