//! Streaming SBDF reader.
//!
//! [`TableReader`] drives the file state machine: file header, table
//! metadata, then table slices until the end-of-table marker. Slices can be
//! consumed one at a time, or [`TableReader::read_table`] assembles the
//! whole file into typed columns with validity masks.

use std::io::Read;

use sbdf_format::{
    BitArray, ColumnSlice, FormatError, Metadata, TableMetadata, TableSlice, file_header,
    slice::PROPERTY_IS_INVALID, table_metadata,
};
use sbdf_types::{SbdfValue, ValueType};

use crate::error::SbdfError;
use crate::table::{Column, Table};

/// A streaming reader over one SBDF file.
pub struct TableReader<R> {
    reader: R,
    metadata: TableMetadata,
    finished: bool,
}

impl<R: Read> TableReader<R> {
    /// Open a reader: consumes and validates the file header, then the
    /// table metadata block.
    pub fn new(mut reader: R) -> Result<Self, SbdfError> {
        file_header::read(&mut reader)?;
        let metadata = TableMetadata::read(&mut reader)?;
        tracing::debug!(columns = metadata.column_count(), "read table metadata");
        Ok(Self {
            reader,
            metadata,
            finished: false,
        })
    }

    /// The table metadata block, available as soon as the reader opens.
    #[must_use]
    pub fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    /// Read the next table slice, or `None` once the end-of-table marker
    /// has been consumed.
    pub fn next_slice(&mut self) -> Result<Option<TableSlice>, SbdfError> {
        if self.finished {
            return Ok(None);
        }
        let slice = TableSlice::read(&mut self.reader, self.metadata.column_count())?;
        if slice.is_none() {
            self.finished = true;
            tracing::debug!("reached end of table");
        }
        Ok(slice)
    }

    /// Consume the remaining slices and assemble the typed columns.
    pub fn read_table(mut self) -> Result<Table, SbdfError> {
        let column_count = self.metadata.column_count();
        let mut names = Vec::with_capacity(column_count);
        let mut types = Vec::with_capacity(column_count);
        let mut user_metadata = Vec::with_capacity(column_count);
        for column in self.metadata.columns() {
            names.push(table_metadata::column_name(column)?.to_owned());
            types.push(table_metadata::column_value_type(column)?);
            user_metadata.push(strip_identity(column)?);
        }

        let mut values: Vec<Vec<SbdfValue>> = vec![Vec::new(); column_count];
        let mut invalid: Vec<BitArray> = vec![BitArray::new(); column_count];
        while let Some(slice) = self.next_slice()? {
            for (i, column_slice) in slice.columns().iter().enumerate() {
                append_column_slice(
                    &names[i],
                    column_slice,
                    &mut values[i],
                    &mut invalid[i],
                )?;
            }
        }

        let mut columns = Vec::with_capacity(column_count);
        for (i, (name, value_type)) in names.into_iter().zip(types).enumerate() {
            let mut column = Column::from_parts(
                name,
                value_type,
                std::mem::take(&mut values[i]),
                std::mem::take(&mut invalid[i]),
            )?;
            column.set_metadata(std::mem::take(&mut user_metadata[i]));
            columns.push(column);
        }

        let mut table = Table::new(columns)?;
        table.set_metadata(clone_unsealed(self.metadata.table())?);
        Ok(table)
    }
}

/// Read an entire SBDF file into a table.
pub fn read_sbdf(reader: impl Read) -> Result<Table, SbdfError> {
    TableReader::new(reader)?.read_table()
}

/// Append one column slice's values and validity to the accumulators.
fn append_column_slice(
    name: &str,
    column_slice: &ColumnSlice,
    values: &mut Vec<SbdfValue>,
    invalid: &mut BitArray,
) -> Result<(), SbdfError> {
    let slice_values = column_slice.values().values()?;
    let row_count = slice_values.len();
    match column_slice.property(PROPERTY_IS_INVALID) {
        None => {
            for _ in 0..row_count {
                invalid.push(false);
            }
        }
        Some(mask) => {
            if mask.row_count() != row_count {
                return Err(SbdfError::MaskLengthMismatch {
                    column: name.to_owned(),
                });
            }
            for bit in mask.values()? {
                invalid.push(bit.as_bool().unwrap_or(false));
            }
        }
    }
    values.extend(slice_values);
    Ok(())
}

/// Copy a column's metadata map without the mandatory identity fields.
fn strip_identity(column: &Metadata) -> Result<Metadata, SbdfError> {
    let mut out = Metadata::new();
    for entry in column.iter() {
        if entry.name == table_metadata::COLUMN_NAME
            || entry.name == table_metadata::COLUMN_DATA_TYPE
        {
            continue;
        }
        out.add_entry(entry.clone())?;
    }
    Ok(out)
}

/// Clone a sealed metadata map into a mutable one.
fn clone_unsealed(metadata: &Metadata) -> Result<Metadata, SbdfError> {
    let mut out = Metadata::new();
    for entry in metadata.iter() {
        out.add_entry(entry.clone())?;
    }
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use sbdf_format::{SectionId, ValueArray, section};
    use std::io::Cursor;

    fn minimal_file(column_types: &[(&str, ValueType)], slices: &[Vec<Vec<SbdfValue>>]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        file_header::write(&mut buf);
        let mut block = TableMetadata::new(Metadata::new());
        for (name, value_type) in column_types {
            let mut column = Metadata::new();
            table_metadata::set_column_identity(&mut column, name, *value_type).unwrap();
            block.add_column(column);
        }
        block.write(&mut buf).unwrap();
        for slice_columns in slices {
            let mut table_slice = TableSlice::new();
            for (values, (_, value_type)) in slice_columns.iter().zip(column_types) {
                table_slice.add(ColumnSlice::new(
                    ValueArray::plain(*value_type, values.clone()).unwrap(),
                ));
            }
            table_slice.write(&mut buf).unwrap();
        }
        TableSlice::write_end(&mut buf);
        buf.to_vec()
    }

    #[test]
    fn test_read_empty_table() {
        let bytes = minimal_file(&[("x", ValueType::Int)], &[]);
        let table = read_sbdf(Cursor::new(bytes)).unwrap();
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_slices_concatenate_in_order() {
        let bytes = minimal_file(
            &[("x", ValueType::Int)],
            &[
                vec![vec![SbdfValue::Int(1), SbdfValue::Int(2)]],
                vec![vec![SbdfValue::Int(3)]],
            ],
        );
        let table = read_sbdf(Cursor::new(bytes)).unwrap();
        let column = table.column("x").unwrap();
        assert_eq!(column.row_count(), 3);
        assert_eq!(
            column.values(),
            &[SbdfValue::Int(1), SbdfValue::Int(2), SbdfValue::Int(3)]
        );
        assert!(column.is_valid(2));
    }

    #[test]
    fn test_missing_is_invalid_means_all_valid() {
        let bytes = minimal_file(
            &[("x", ValueType::Double)],
            &[vec![vec![SbdfValue::Double(1.0), SbdfValue::Double(2.0)]]],
        );
        let table = read_sbdf(Cursor::new(bytes)).unwrap();
        let column = table.column("x").unwrap();
        assert_eq!(column.validity().count_set(), 0);
    }

    #[test]
    fn test_next_slice_after_end_is_none() {
        let bytes = minimal_file(&[("x", ValueType::Int)], &[]);
        let mut reader = TableReader::new(Cursor::new(bytes)).unwrap();
        assert!(reader.next_slice().unwrap().is_none());
        assert!(reader.next_slice().unwrap().is_none());
    }

    #[test]
    fn test_truncated_file_is_io_error() {
        let bytes = minimal_file(&[("x", ValueType::Int)], &[]);
        let truncated = &bytes[..bytes.len() - 2];
        assert!(read_sbdf(Cursor::new(truncated)).is_err());
    }

    #[test]
    fn test_garbage_header_is_magic_error() {
        let err = read_sbdf(Cursor::new([0u8; 16])).unwrap_err();
        assert!(matches!(
            err,
            SbdfError::Format(FormatError::MissingMagic)
        ));
    }

    #[test]
    fn test_stray_section_mid_stream() {
        let mut buf = minimal_file(&[("x", ValueType::Int)], &[]);
        // truncate the end marker and splice in a file header section instead
        buf.truncate(buf.len() - 3);
        let mut tail = BytesMut::new();
        section::write(&mut tail, SectionId::FileHeader);
        buf.extend_from_slice(&tail);
        let err = read_sbdf(Cursor::new(buf)).unwrap_err();
        assert!(matches!(
            err,
            SbdfError::Format(FormatError::UnexpectedSectionId { .. })
        ));
    }
}
