//! Column and table slices.
//!
//! A table slice holds one column slice per table column; a column slice is
//! a value array plus an ordered set of named value-array properties. The
//! only property interpreted by this implementation is `IsInvalid`, the
//! per-cell validity bit array; other properties are carried through intact.

use std::io::Read;

use bytes::BufMut;

use crate::array::ValueArray;
use crate::error::FormatError;
use crate::io;
use crate::section::{self, SectionId};

/// Property marking missing cells with a bit array.
pub const PROPERTY_IS_INVALID: &str = "IsInvalid";
/// Recognized but uninterpreted: per-cell error codes.
pub const PROPERTY_ERROR_CODE: &str = "ErrorCode";
/// Recognized but uninterpreted: cells whose value was replaced.
pub const PROPERTY_HAS_REPLACED_VALUE: &str = "HasReplacedValue";

/// One column's slice of rows: values plus named properties.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSlice {
    values: ValueArray,
    properties: Vec<(String, ValueArray)>,
}

impl ColumnSlice {
    /// Create a column slice around its value array.
    #[must_use]
    pub fn new(values: ValueArray) -> Self {
        Self {
            values,
            properties: Vec::new(),
        }
    }

    /// The slice's value array.
    #[must_use]
    pub fn values(&self) -> &ValueArray {
        &self.values
    }

    /// Add a named property array.
    pub fn add_property(
        &mut self,
        name: impl Into<String>,
        values: ValueArray,
    ) -> Result<(), FormatError> {
        let name = name.into();
        if self.property(&name).is_some() {
            return Err(FormatError::PropertyExists { name });
        }
        self.properties.push((name, values));
        Ok(())
    }

    /// Get a property array by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&ValueArray> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterate the properties in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &ValueArray)> {
        self.properties.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of rows in the slice.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.values.row_count()
    }

    /// Append the slice: section header, values, property count, properties.
    pub fn write(&self, buf: &mut impl BufMut) -> Result<(), FormatError> {
        section::write(buf, SectionId::ColumnSlice);
        self.values.write(buf)?;
        io::put_len(buf, self.properties.len())?;
        for (name, values) in &self.properties {
            io::put_string(buf, name)?;
            values.write(buf)?;
        }
        Ok(())
    }

    /// Read one column slice.
    pub fn read(r: &mut impl Read) -> Result<Self, FormatError> {
        section::expect(r, SectionId::ColumnSlice)?;
        let values = ValueArray::read(r)?;
        let mut slice = Self::new(values);
        let count = io::read_len(r)?;
        for _ in 0..count {
            let name = io::read_string(r)?;
            let values = ValueArray::read(r)?;
            slice.add_property(name, values)?;
        }
        Ok(slice)
    }

    /// Skip one column slice without materializing values or properties.
    pub fn skip(r: &mut impl Read) -> Result<(), FormatError> {
        section::expect(r, SectionId::ColumnSlice)?;
        ValueArray::skip(r)?;
        let count = io::read_len(r)?;
        for _ in 0..count {
            let name_len = io::read_len(r)?;
            io::skip_bytes(r, name_len as u64)?;
            ValueArray::skip(r)?;
        }
        Ok(())
    }
}

/// A fixed-count sequence of column slices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableSlice {
    columns: Vec<ColumnSlice>,
}

impl TableSlice {
    /// Create an empty table slice.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one column slice.
    pub fn add(&mut self, column: ColumnSlice) {
        self.columns.push(column);
    }

    /// The column slices, in column order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnSlice] {
        &self.columns
    }

    /// Number of column slices.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Append the slice: section header, column count, column slices.
    pub fn write(&self, buf: &mut impl BufMut) -> Result<(), FormatError> {
        section::write(buf, SectionId::TableSlice);
        io::put_len(buf, self.columns.len())?;
        for column in &self.columns {
            column.write(buf)?;
        }
        Ok(())
    }

    /// Append the end-of-table marker.
    pub fn write_end(buf: &mut impl BufMut) {
        section::write(buf, SectionId::TableEnd);
    }

    /// Read the next table slice, or `None` at the end-of-table marker.
    ///
    /// `expected_columns` is the table metadata's column count; a slice
    /// declaring any other count is a hard error.
    pub fn read(r: &mut impl Read, expected_columns: usize) -> Result<Option<Self>, FormatError> {
        match section::read(r)? {
            SectionId::TableEnd => return Ok(None),
            SectionId::TableSlice => {}
            other => return Err(FormatError::UnexpectedSectionId { actual: other as u8 }),
        }
        let count = io::read_len(r)?;
        if count != expected_columns {
            return Err(FormatError::ColumnCountMismatch {
                expected: expected_columns,
                actual: count,
            });
        }
        let mut slice = Self::new();
        for _ in 0..count {
            slice.add(ColumnSlice::read(r)?);
        }
        Ok(Some(slice))
    }
}
