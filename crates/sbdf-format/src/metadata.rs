//! Metadata blocks.
//!
//! A metadata block is an ordered, unique-keyed map from name to an optional
//! value and an optional default, sharing one declared value type. Blocks are
//! mutable while being populated and sealed once incorporated into a table
//! metadata block; later mutation is a usage error.

use std::io::Read;

use bytes::BufMut;

use sbdf_types::{SbdfValue, ValueType};

use crate::error::FormatError;
use crate::io;
use crate::object;

/// One named metadata entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataEntry {
    /// Entry name, unique within its block.
    pub name: String,
    /// Declared type shared by value and default.
    pub value_type: ValueType,
    /// The value, if present.
    pub value: Option<SbdfValue>,
    /// The default value, if present.
    pub default: Option<SbdfValue>,
}

/// An ordered, unique-keyed metadata map with a seal lifecycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metadata {
    entries: Vec<MetadataEntry>,
    sealed: bool,
}

impl Metadata {
    /// Create an empty, mutable metadata block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named value with no default.
    pub fn add(&mut self, name: impl Into<String>, value: SbdfValue) -> Result<(), FormatError> {
        let value_type = value.value_type();
        self.add_entry(MetadataEntry {
            name: name.into(),
            value_type,
            value: Some(value),
            default: None,
        })
    }

    /// Add a named value together with a default of the same type.
    pub fn add_with_default(
        &mut self,
        name: impl Into<String>,
        value: SbdfValue,
        default: SbdfValue,
    ) -> Result<(), FormatError> {
        if value.value_type() != default.value_type() {
            return Err(FormatError::ValueTypeMismatch);
        }
        let value_type = value.value_type();
        self.add_entry(MetadataEntry {
            name: name.into(),
            value_type,
            value: Some(value),
            default: Some(default),
        })
    }

    /// Add a fully-specified entry.
    ///
    /// Used by the readers, which may see entries with an absent value.
    pub fn add_entry(&mut self, entry: MetadataEntry) -> Result<(), FormatError> {
        if self.sealed {
            return Err(FormatError::MetadataReadOnly);
        }
        if let (Some(value), Some(default)) = (&entry.value, &entry.default) {
            if value.value_type() != default.value_type() {
                return Err(FormatError::ValueTypeMismatch);
            }
        }
        if self.exists(&entry.name) {
            return Err(FormatError::MetadataExists { name: entry.name });
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Remove the named entry if present.
    pub fn remove(&mut self, name: &str) -> Result<(), FormatError> {
        if self.sealed {
            return Err(FormatError::MetadataReadOnly);
        }
        self.entries.retain(|e| e.name != name);
        Ok(())
    }

    /// Get the named entry's value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SbdfValue> {
        self.entry(name).and_then(|e| e.value.as_ref())
    }

    /// Get the named entry's default value.
    #[must_use]
    pub fn get_default(&self, name: &str) -> Option<&SbdfValue> {
        self.entry(name).and_then(|e| e.default.as_ref())
    }

    /// Get the named entry.
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&MetadataEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Check whether the named entry exists.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &MetadataEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the block is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Seal the block against further mutation.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Check whether the block has been sealed.
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Append the block: `u32 count`, then per entry name, type tag, and
    /// presence-flagged value and default.
    pub fn write(&self, buf: &mut impl BufMut) -> Result<(), FormatError> {
        io::put_len(buf, self.entries.len())?;
        for entry in &self.entries {
            io::put_string(buf, &entry.name)?;
            buf.put_u8(entry.value_type as u8);
            write_optional(buf, entry.value_type, entry.value.as_ref())?;
            write_optional(buf, entry.value_type, entry.default.as_ref())?;
        }
        Ok(())
    }

    /// Read a block written by [`Metadata::write`]. The result is unsealed.
    pub fn read(r: &mut impl Read) -> Result<Self, FormatError> {
        let count = io::read_len(r)?;
        let mut metadata = Self::new();
        for _ in 0..count {
            let name = io::read_string(r)?;
            let value_type = read_value_type(r)?;
            let value = read_optional(r, value_type)?;
            let default = read_optional(r, value_type)?;
            metadata.add_entry(MetadataEntry {
                name,
                value_type,
                value,
                default,
            })?;
        }
        Ok(metadata)
    }
}

/// Append a presence flag and, when present, a bare scalar.
pub(crate) fn write_optional(
    buf: &mut impl BufMut,
    declared: ValueType,
    value: Option<&SbdfValue>,
) -> Result<(), FormatError> {
    match value {
        Some(value) => {
            buf.put_u8(1);
            object::write_scalar(buf, declared, value)
        }
        None => {
            buf.put_u8(0);
            Ok(())
        }
    }
}

/// Read a presence flag and, when present, a bare scalar.
pub(crate) fn read_optional(
    r: &mut impl Read,
    declared: ValueType,
) -> Result<Option<SbdfValue>, FormatError> {
    if io::read_u8(r)? == 0 {
        Ok(None)
    } else {
        object::read_scalar(r, declared).map(Some)
    }
}

/// Read and resolve a value-type tag byte.
pub(crate) fn read_value_type(r: &mut impl Read) -> Result<ValueType, FormatError> {
    let id = io::read_u8(r)?;
    ValueType::from_u8(id).ok_or(FormatError::Type(sbdf_types::TypeError::UnknownTypeId(id)))
}
