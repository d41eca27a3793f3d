//! SBDF file header.

use std::io::Read;

use bytes::BufMut;

use crate::error::FormatError;
use crate::io;
use crate::section::{self, SectionId};

/// Major version written and accepted by this implementation.
pub const MAJOR_VERSION: u8 = 1;
/// Minor version written and accepted by this implementation.
pub const MINOR_VERSION: u8 = 0;

/// Append the file header section.
pub fn write(buf: &mut impl BufMut) {
    section::write(buf, SectionId::FileHeader);
    buf.put_u8(MAJOR_VERSION);
    buf.put_u8(MINOR_VERSION);
}

/// Consume the file header, failing on any version other than 1.0.
pub fn read(r: &mut impl Read) -> Result<(), FormatError> {
    section::expect(r, SectionId::FileHeader)?;
    let major = io::read_u8(r)?;
    let minor = io::read_u8(r)?;
    if major != MAJOR_VERSION || minor != MINOR_VERSION {
        return Err(FormatError::UnsupportedVersion { major, minor });
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
        write(&mut buf);
        assert_eq!(&buf[..], &[0xDF, 0x5B, 0x1, 1, 0]);
        let mut cursor = Cursor::new(buf.freeze());
        read(&mut cursor).unwrap();
    }

    #[test]
    fn test_unsupported_version() {
        let mut cursor = Cursor::new([0xDF, 0x5B, 0x1, 2, 0]);
        let err = read(&mut cursor).unwrap_err();
        assert_eq!(err.to_string(), "unsupported file version 2.0");
    }
}
