//! Streaming SBDF writer.
//!
//! [`TableWriter`] emits the file header, the table metadata block built
//! from the table's columns, the rows partitioned into fixed-size slices,
//! and the end-of-table marker. Each slice is materialized in a reused
//! scratch buffer before a single write to the underlying stream, so
//! variable-length totals are known without a second pass over the data.

use std::io::Write;

use bytes::BytesMut;

use sbdf_format::{
    BitArray, ColumnSlice, Metadata, TableMetadata, TableSlice, ValueArray, file_header,
    slice::PROPERTY_IS_INVALID, table_metadata,
};
use sbdf_types::ValueType;

use crate::error::SbdfError;
use crate::infer;
use crate::table::{Column, Table};

/// Target number of rows per table slice.
pub const SLICE_ROW_COUNT: usize = 50_000;

/// A streaming writer over one SBDF file.
pub struct TableWriter<W: Write> {
    writer: W,
    scratch: BytesMut,
}

impl<W: Write> TableWriter<W> {
    /// Create a writer around an output stream.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            scratch: BytesMut::new(),
        }
    }

    /// Write a complete table: header, metadata, slices, end marker.
    pub fn write_table(&mut self, table: &Table) -> Result<(), SbdfError> {
        let effective_types: Vec<ValueType> = table
            .columns()
            .iter()
            .map(|column| {
                let promoted = infer::promote_for_write(column.value_type(), column.values());
                if promoted != column.value_type() {
                    tracing::debug!(
                        column = column.name(),
                        "promoting Integer column to LongInteger"
                    );
                }
                promoted
            })
            .collect();

        self.scratch.clear();
        file_header::write(&mut self.scratch);
        self.build_metadata(table, &effective_types)?
            .write(&mut self.scratch)?;
        self.flush_scratch()?;

        let row_count = table.row_count();
        let mut offset = 0;
        while offset < row_count {
            let len = SLICE_ROW_COUNT.min(row_count - offset);
            self.scratch.clear();
            let slice = build_slice(table, &effective_types, offset, len)?;
            slice.write(&mut self.scratch)?;
            self.flush_scratch()?;
            tracing::debug!(rows = len, offset, "wrote table slice");
            offset += len;
        }

        self.scratch.clear();
        TableSlice::write_end(&mut self.scratch);
        self.flush_scratch()?;
        self.writer.flush().map_err(sbdf_format::FormatError::from)?;
        Ok(())
    }

    /// Unwrap the underlying stream.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn build_metadata(
        &self,
        table: &Table,
        effective_types: &[ValueType],
    ) -> Result<TableMetadata, SbdfError> {
        let mut table_map = Metadata::new();
        for entry in table.metadata().iter() {
            table_map.add_entry(entry.clone())?;
        }
        let mut block = TableMetadata::new(table_map);
        for (column, value_type) in table.columns().iter().zip(effective_types) {
            let mut map = Metadata::new();
            table_metadata::set_column_identity(&mut map, column.name(), *value_type)?;
            for entry in column.metadata().iter() {
                map.add_entry(entry.clone())?;
            }
            block.add_column(map);
        }
        Ok(block)
    }

    fn flush_scratch(&mut self) -> Result<(), SbdfError> {
        self.writer
            .write_all(&self.scratch)
            .map_err(sbdf_format::FormatError::from)?;
        Ok(())
    }
}

/// Build one table slice covering `offset..offset + len`.
fn build_slice(
    table: &Table,
    effective_types: &[ValueType],
    offset: usize,
    len: usize,
) -> Result<TableSlice, SbdfError> {
    let mut slice = TableSlice::new();
    for (column, value_type) in table.columns().iter().zip(effective_types) {
        slice.add(build_column_slice(column, *value_type, offset, len)?);
    }
    Ok(slice)
}

fn build_column_slice(
    column: &Column,
    value_type: ValueType,
    offset: usize,
    len: usize,
) -> Result<ColumnSlice, SbdfError> {
    let values = column.values()[offset..offset + len].to_vec();
    let mut column_slice = ColumnSlice::new(ValueArray::Plain { value_type, values });

    let invalid: BitArray = (offset..offset + len)
        .map(|row| !column.is_valid(row))
        .collect();
    if invalid.any() {
        column_slice.add_property(PROPERTY_IS_INVALID, ValueArray::Bit(invalid))?;
    }
    Ok(column_slice)
}

/// Write a complete table to an SBDF stream.
pub fn write_sbdf(writer: impl Write, table: &Table) -> Result<(), SbdfError> {
    TableWriter::new(writer).write_table(table)
}
