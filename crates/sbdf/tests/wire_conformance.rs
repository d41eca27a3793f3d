//! Byte-exact wire conformance for a minimal file.
//!
//! Pins the full layout of the smallest interesting file: one `Integer`
//! column named `x` holding the single value 69, no user metadata. Any
//! change to framing, the metadata fold, or array encoding shows up here
//! as a literal byte diff.

#![allow(clippy::unwrap_used)]

use std::io::Cursor;

use sbdf::{Column, SbdfValue, Table, ValueType, read_sbdf, write_sbdf};

#[rustfmt::skip]
const EXPECTED: &[u8] = &[
    // file header
    0xDF, 0x5B, 0x01, 0x01, 0x00,
    // table metadata section, empty table-level map
    0xDF, 0x5B, 0x02,
    0x00, 0x00, 0x00, 0x00,
    // one column
    0x01, 0x00, 0x00, 0x00,
    // two folded fields, sorted: DataType before Name
    0x02, 0x00, 0x00, 0x00,
    0x08, 0x00, 0x00, 0x00, b'D', b'a', b't', b'a', b'T', b'y', b'p', b'e',
    0x0C, // Binary
    0x00, // no default
    0x04, 0x00, 0x00, 0x00, b'N', b'a', b'm', b'e',
    0x0A, // String
    0x00, // no default
    // column 0: DataType = [0x02] (Integer), Name = "x"
    0x01, 0x01, 0x00, 0x00, 0x00, 0x02,
    0x01, 0x01, 0x00, 0x00, 0x00, b'x',
    // table slice with one column slice
    0xDF, 0x5B, 0x03,
    0x01, 0x00, 0x00, 0x00,
    // column slice: plain array of one Integer, no properties
    0xDF, 0x5B, 0x04,
    0x01, 0x02,
    0x01, 0x00, 0x00, 0x00,
    0x45, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
    // end of table
    0xDF, 0x5B, 0x05,
];

#[test]
fn minimal_file_bytes_are_stable() {
    let column = Column::new("x", ValueType::Int, vec![Some(SbdfValue::Int(69))]);
    let table = Table::new(vec![column]).unwrap();
    let mut buffer = Vec::new();
    write_sbdf(&mut buffer, &table).unwrap();
    assert_eq!(buffer, EXPECTED);
}

#[test]
fn minimal_file_bytes_read_back() {
    let table = read_sbdf(Cursor::new(EXPECTED.to_vec())).unwrap();
    assert_eq!(table.column_count(), 1);
    assert_eq!(table.column("x").unwrap().get(0), Some(&SbdfValue::Int(69)));
}
