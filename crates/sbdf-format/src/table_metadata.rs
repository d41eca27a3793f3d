//! Table metadata blocks.
//!
//! A table metadata block carries the table-wide metadata map plus one
//! metadata map per column. On the wire the per-column maps are folded:
//! each distinct key becomes a field descriptor (name, type, default), and
//! every column then contributes one optional scalar per descriptor. All
//! columns sharing a key must agree on its type and default. Descriptors are
//! emitted in sorted key order.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::io::Read;

use bytes::{BufMut, Bytes};

use sbdf_types::{SbdfValue, TypeError, ValueType};

use crate::error::FormatError;
use crate::io;
use crate::metadata::{self, Metadata, MetadataEntry};
use crate::section::{self, SectionId};

/// Mandatory column metadata field holding the column name.
pub const COLUMN_NAME: &str = "Name";
/// Mandatory column metadata field holding the column's value-type tag.
pub const COLUMN_DATA_TYPE: &str = "DataType";

/// Table-wide metadata plus the ordered per-column metadata maps.
///
/// Incorporated metadata is sealed; the maps can no longer be modified once
/// they are part of a table metadata block.
#[derive(Debug, Clone, PartialEq)]
pub struct TableMetadata {
    table: Metadata,
    columns: Vec<Metadata>,
}

impl TableMetadata {
    /// Create a table metadata block, sealing the table-wide map.
    #[must_use]
    pub fn new(mut table: Metadata) -> Self {
        table.seal();
        Self {
            table,
            columns: Vec::new(),
        }
    }

    /// Append one column's metadata map, sealing it.
    pub fn add_column(&mut self, mut column: Metadata) {
        column.seal();
        self.columns.push(column);
    }

    /// The table-wide metadata map.
    #[must_use]
    pub fn table(&self) -> &Metadata {
        &self.table
    }

    /// The per-column metadata maps, in column order.
    #[must_use]
    pub fn columns(&self) -> &[Metadata] {
        &self.columns
    }

    /// Number of columns described by this block.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Append the block: section header, table map, column count, folded
    /// field descriptors, then one optional scalar per column and field.
    pub fn write(&self, buf: &mut impl BufMut) -> Result<(), FormatError> {
        section::write(buf, SectionId::TableMetadata);
        self.table.write(buf)?;
        io::put_len(buf, self.columns.len())?;

        // fold duplicate keys across columns; type and default must agree
        let mut fields: BTreeMap<&str, (ValueType, Option<&SbdfValue>)> = BTreeMap::new();
        for column in &self.columns {
            for entry in column.iter() {
                let field_type = match (&entry.value, &entry.default) {
                    (Some(value), _) => value.value_type(),
                    (None, Some(default)) => default.value_type(),
                    (None, None) => entry.value_type,
                };
                match fields.entry(entry.name.as_str()) {
                    Entry::Occupied(slot) => {
                        let (known_type, known_default) = slot.get();
                        if *known_type != field_type || *known_default != entry.default.as_ref() {
                            return Err(FormatError::InvalidMetadata);
                        }
                    }
                    Entry::Vacant(slot) => {
                        slot.insert((field_type, entry.default.as_ref()));
                    }
                }
            }
        }

        io::put_len(buf, fields.len())?;
        for (name, (value_type, default)) in &fields {
            io::put_string(buf, name)?;
            buf.put_u8(*value_type as u8);
            metadata::write_optional(buf, *value_type, *default)?;
        }
        for column in &self.columns {
            for (name, (value_type, _)) in &fields {
                metadata::write_optional(buf, *value_type, column.get(name))?;
            }
        }
        Ok(())
    }

    /// Read a block written by [`TableMetadata::write`].
    pub fn read(r: &mut impl Read) -> Result<Self, FormatError> {
        section::expect(r, SectionId::TableMetadata)?;
        let table = Metadata::read(r)?;
        let mut block = Self::new(table);

        let column_count = io::read_len(r)?;
        let field_count = io::read_len(r)?;
        let mut fields = Vec::with_capacity(field_count);
        for _ in 0..field_count {
            let name = io::read_string(r)?;
            let value_type = metadata::read_value_type(r)?;
            let default = metadata::read_optional(r, value_type)?;
            fields.push((name, value_type, default));
        }
        for _ in 0..column_count {
            let mut column = Metadata::new();
            for (name, value_type, default) in &fields {
                if let Some(value) = metadata::read_optional(r, *value_type)? {
                    column.add_entry(MetadataEntry {
                        name: name.clone(),
                        value_type: *value_type,
                        value: Some(value),
                        default: default.clone(),
                    })?;
                }
            }
            block.add_column(column);
        }
        Ok(block)
    }
}

/// Add the mandatory `Name` and `DataType` entries to a column metadata map.
pub fn set_column_identity(
    column: &mut Metadata,
    name: &str,
    value_type: ValueType,
) -> Result<(), FormatError> {
    column.add(COLUMN_NAME, SbdfValue::from(name))?;
    column.add(
        COLUMN_DATA_TYPE,
        SbdfValue::Binary(Bytes::copy_from_slice(&[value_type as u8])),
    )
}

/// Get the column name from a column metadata map.
pub fn column_name(column: &Metadata) -> Result<&str, FormatError> {
    column
        .get(COLUMN_NAME)
        .and_then(SbdfValue::as_str)
        .ok_or(FormatError::InvalidMetadata)
}

/// Get the declared value type from a column metadata map.
///
/// The `DataType` entry must be binary and hold exactly the one-byte tag.
pub fn column_value_type(column: &Metadata) -> Result<ValueType, FormatError> {
    let data = column
        .get(COLUMN_DATA_TYPE)
        .and_then(SbdfValue::as_bytes)
        .ok_or(FormatError::InvalidMetadata)?;
    if data.len() != 1 {
        return Err(FormatError::InvalidMetadata);
    }
    ValueType::from_u8(data[0]).ok_or(FormatError::Type(TypeError::UnknownTypeId(data[0])))
}
