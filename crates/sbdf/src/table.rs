//! In-memory table model.
//!
//! A [`Table`] is an ordered set of typed [`Column`]s plus a table-wide
//! metadata map. Each column stores its cells densely: missing cells hold
//! the type's sentinel value and are flagged in the column's validity mask,
//! mirroring how they travel on the wire.

use sbdf_format::{BitArray, Metadata};
use sbdf_types::{SbdfValue, ValueType};

use crate::error::SbdfError;

/// One typed column with a validity mask and user metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    value_type: ValueType,
    values: Vec<SbdfValue>,
    invalid: BitArray,
    metadata: Metadata,
}

impl Column {
    /// Build a column of `value_type` from optional cells.
    ///
    /// `None` cells are stored as the type's missing-value sentinel and
    /// marked invalid. Present cells are stored as given; a cell whose type
    /// is incompatible with `value_type` fails later, in the scalar encoder.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        value_type: ValueType,
        cells: Vec<Option<SbdfValue>>,
    ) -> Self {
        let mut values = Vec::with_capacity(cells.len());
        let mut invalid = BitArray::zeros(cells.len());
        for (row, cell) in cells.into_iter().enumerate() {
            match cell {
                Some(value) => values.push(value),
                None => {
                    values.push(value_type.missing_value());
                    invalid.set(row, true);
                }
            }
        }
        Self {
            name: name.into(),
            value_type,
            values,
            invalid,
            metadata: Metadata::new(),
        }
    }

    /// Build a column from already-separated values and validity mask.
    ///
    /// The mask must cover the values one-to-one; `true` marks a missing
    /// cell. This is the constructive half of the host-container adapter.
    pub fn from_parts(
        name: impl Into<String>,
        value_type: ValueType,
        values: Vec<SbdfValue>,
        invalid: BitArray,
    ) -> Result<Self, SbdfError> {
        let name = name.into();
        if invalid.len() != values.len() {
            return Err(SbdfError::MaskLengthMismatch { column: name });
        }
        Ok(Self {
            name,
            value_type,
            values,
            invalid,
            metadata: Metadata::new(),
        })
    }

    /// The column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared value type.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.values.len()
    }

    /// Get the cell at `row`, or `None` when the cell is missing or out of
    /// range.
    ///
    /// The validity mask is the sole source of truth for missingness; the
    /// stored value of an invalid cell is never inspected.
    #[must_use]
    pub fn get(&self, row: usize) -> Option<&SbdfValue> {
        if row >= self.values.len() || self.invalid.get(row) {
            None
        } else {
            Some(&self.values[row])
        }
    }

    /// Check whether the cell at `row` holds a value.
    #[must_use]
    pub fn is_valid(&self, row: usize) -> bool {
        row < self.values.len() && !self.invalid.get(row)
    }

    /// The raw stored values, sentinels included.
    #[must_use]
    pub fn values(&self) -> &[SbdfValue] {
        &self.values
    }

    /// The validity mask; a set bit marks a missing cell.
    #[must_use]
    pub fn validity(&self) -> &BitArray {
        &self.invalid
    }

    /// Iterate the cells as optional values.
    pub fn cells(&self) -> impl Iterator<Item = Option<&SbdfValue>> + '_ {
        (0..self.values.len()).map(|row| self.get(row))
    }

    /// User metadata attached to this column (never `Name`/`DataType`).
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Mutable access to the column's user metadata.
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// Replace the column's user metadata.
    pub fn set_metadata(&mut self, metadata: Metadata) {
        self.metadata = metadata;
    }

    pub(crate) fn set_value_type(&mut self, value_type: ValueType) {
        self.value_type = value_type;
    }
}

/// An ordered collection of columns with table-wide metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    metadata: Metadata,
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, validating that column names are unique and all
    /// columns agree on row count.
    pub fn new(columns: Vec<Column>) -> Result<Self, SbdfError> {
        let row_count = columns.first().map_or(0, Column::row_count);
        for column in &columns {
            if column.row_count() != row_count {
                return Err(SbdfError::InconsistentColumnLength {
                    column: column.name().to_owned(),
                });
            }
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name() == column.name()) {
                return Err(SbdfError::DuplicateColumnName {
                    name: column.name().to_owned(),
                });
            }
        }
        Ok(Self {
            metadata: Metadata::new(),
            columns,
        })
    }

    /// The table-wide metadata map.
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Mutable access to the table-wide metadata.
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// Replace the table-wide metadata.
    pub fn set_metadata(&mut self, metadata: Metadata) {
        self.metadata = metadata;
    }

    /// The columns, in order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Mutable access to the columns.
    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows (zero for a table with no columns).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::row_count)
    }

    /// Look up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }
}
