//! Section framing.
//!
//! Every SBDF section opens with the magic bytes `0xDF 0x5B` followed by a
//! one-byte section id.

use std::io::Read;

use bytes::BufMut;

use crate::error::FormatError;
use crate::io;

/// First magic byte of a section header.
pub const MAGIC_0: u8 = 0xDF;
/// Second magic byte of a section header.
pub const MAGIC_1: u8 = 0x5B;

/// SBDF section identifiers.
///
/// The wire id `0x0` (unknown) has no variant and is never emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SectionId {
    /// File header section.
    FileHeader = 0x1,
    /// Table metadata section, marking the beginning of a complete table.
    TableMetadata = 0x2,
    /// Table slice section.
    TableSlice = 0x3,
    /// Column slice section.
    ColumnSlice = 0x4,
    /// End of a complete data table.
    TableEnd = 0x5,
}

impl SectionId {
    /// Create a section id from its wire byte.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x1 => Some(Self::FileHeader),
            0x2 => Some(Self::TableMetadata),
            0x3 => Some(Self::TableSlice),
            0x4 => Some(Self::ColumnSlice),
            0x5 => Some(Self::TableEnd),
            _ => None,
        }
    }
}

/// Append a section header for `id`.
pub fn write(buf: &mut impl BufMut, id: SectionId) {
    buf.put_u8(MAGIC_0);
    buf.put_u8(MAGIC_1);
    buf.put_u8(id as u8);
}

/// Read one section header, validating the magic bytes.
pub fn read(r: &mut impl Read) -> Result<SectionId, FormatError> {
    if io::read_u8(r)? != MAGIC_0 || io::read_u8(r)? != MAGIC_1 {
        return Err(FormatError::MissingMagic);
    }
    let id = io::read_u8(r)?;
    SectionId::from_u8(id).ok_or(FormatError::UnexpectedSectionId { actual: id })
}

/// Read one section header and require it to carry `id`.
pub fn expect(r: &mut impl Read, id: SectionId) -> Result<(), FormatError> {
    let actual = read(r)?;
    if actual != id {
        return Err(FormatError::UnexpectedSectionId { actual: actual as u8 });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use std::io::Cursor;

    #[test]
    fn test_roundtrip() {
        let mut buf = BytesMut::new();
        write(&mut buf, SectionId::TableSlice);
        assert_eq!(&buf[..], &[0xDF, 0x5B, 0x3]);
        let mut cursor = Cursor::new(buf.freeze());
        assert_eq!(read(&mut cursor).unwrap(), SectionId::TableSlice);
    }

    #[test]
    fn test_bad_magic() {
        let mut cursor = Cursor::new([0xDE, 0x5B, 0x1]);
        assert!(matches!(read(&mut cursor), Err(FormatError::MissingMagic)));
        let mut cursor = Cursor::new([0xDF, 0x5C, 0x1]);
        assert!(matches!(read(&mut cursor), Err(FormatError::MissingMagic)));
    }

    #[test]
    fn test_unknown_id() {
        let mut cursor = Cursor::new([0xDF, 0x5B, 0x9]);
        assert!(matches!(
            read(&mut cursor),
            Err(FormatError::UnexpectedSectionId { actual: 0x9 })
        ));
    }

    #[test]
    fn test_expect_mismatch() {
        let mut buf = BytesMut::new();
        write(&mut buf, SectionId::TableEnd);
        let mut cursor = Cursor::new(buf.freeze());
        assert!(expect(&mut cursor, SectionId::TableSlice).is_err());
    }
}
