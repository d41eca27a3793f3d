//! Shared fixtures for SBDF integration tests.
//!
//! The values here reproduce the classic SBDF conformance fixtures: a
//! twelve-type schema with one metadata entry per value type, and the
//! mixed-validity single row used by the streaming tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use bytes::Bytes;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use std::str::FromStr;

use sbdf::{Column, Metadata, SbdfValue, ValueType};

/// Names of the twelve fixture columns, one per value type, in fixture order.
pub const COLUMN_NAMES: [(&str, ValueType); 12] = [
    ("Boolean", ValueType::Bool),
    ("Integer", ValueType::Int),
    ("Long", ValueType::Long),
    ("Float", ValueType::Float),
    ("Double", ValueType::Double),
    ("DateTime", ValueType::DateTime),
    ("Date", ValueType::Date),
    ("Time", ValueType::Time),
    ("TimeSpan", ValueType::TimeSpan),
    ("String", ValueType::String),
    ("Decimal", ValueType::Decimal),
    ("Binary", ValueType::Binary),
];

/// The fixture timestamp 1583-01-01T00:00:00.
pub fn fixture_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1583, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// One metadata value of each value type, keyed `<prefix>Meta<TypeName>`.
///
/// The values match the classic `0.sbdf` fixture: `MetaInteger=3`,
/// `MetaDouble=3.14`, `MetaString="The"`, and so on.
pub fn meta_values(prefix: &str) -> Vec<(String, SbdfValue)> {
    vec![
        (format!("{prefix}MetaBoolean"), SbdfValue::Bool(true)),
        (format!("{prefix}MetaInteger"), SbdfValue::Int(3)),
        (format!("{prefix}MetaLong"), SbdfValue::Long(2)),
        (format!("{prefix}MetaFloat"), SbdfValue::Float(1.0 / 3.0)),
        (format!("{prefix}MetaDouble"), SbdfValue::Double(3.14)),
        (
            format!("{prefix}MetaDateTime"),
            SbdfValue::DateTime(fixture_datetime()),
        ),
        (
            format!("{prefix}MetaDate"),
            SbdfValue::Date(fixture_datetime().date()),
        ),
        (
            format!("{prefix}MetaTime"),
            SbdfValue::Time(NaiveTime::from_hms_opt(0, 0, 33).unwrap()),
        ),
        (
            format!("{prefix}MetaTimeSpan"),
            SbdfValue::TimeSpan(TimeDelta::milliseconds(12_300)),
        ),
        (format!("{prefix}MetaString"), SbdfValue::from("The")),
        (
            format!("{prefix}MetaDecimal"),
            SbdfValue::Decimal(Decimal::from_str("33.4455").unwrap()),
        ),
        (
            format!("{prefix}MetaBinary"),
            SbdfValue::Binary(Bytes::from_static(&[0x01])),
        ),
    ]
}

/// A metadata map populated by [`meta_values`].
pub fn meta_block(prefix: &str) -> Metadata {
    let mut metadata = Metadata::new();
    for (name, value) in meta_values(prefix) {
        metadata.add(name, value).unwrap();
    }
    metadata
}

/// Twelve empty columns, one per value type, each carrying a full set of
/// per-type metadata entries.
pub fn empty_all_types_columns() -> Vec<Column> {
    COLUMN_NAMES
        .iter()
        .enumerate()
        .map(|(i, (name, value_type))| {
            let mut column = Column::new(*name, *value_type, vec![]);
            column.set_metadata(meta_block(&format!("SbdfTest.Column{i}.")));
            column
        })
        .collect()
}

/// The mixed-validity single row of the `1.sbdf` fixture: eleven columns
/// where `Long`, `DateTime`, and `Binary` are missing.
pub fn mixed_validity_columns() -> Vec<Column> {
    vec![
        Column::new("Boolean", ValueType::Bool, vec![Some(SbdfValue::Bool(false))]),
        Column::new("Integer", ValueType::Int, vec![Some(SbdfValue::Int(69))]),
        Column::new("Long", ValueType::Long, vec![None]),
        Column::new("Float", ValueType::Float, vec![Some(SbdfValue::Float(12.0))]),
        Column::new(
            "Double",
            ValueType::Double,
            vec![Some(SbdfValue::Double(116.18))],
        ),
        Column::new("DateTime", ValueType::DateTime, vec![None]),
        Column::new(
            "Date",
            ValueType::Date,
            vec![Some(SbdfValue::Date(
                NaiveDate::from_ymd_opt(1583, 1, 2).unwrap(),
            ))],
        ),
        Column::new(
            "Time",
            ValueType::Time,
            vec![Some(SbdfValue::Time(NaiveTime::from_hms_opt(0, 22, 20).unwrap()))],
        ),
        Column::new(
            "TimeSpan",
            ValueType::TimeSpan,
            vec![Some(SbdfValue::TimeSpan(TimeDelta::milliseconds(504_300)))],
        ),
        Column::new("String", ValueType::String, vec![Some(SbdfValue::from("The"))]),
        Column::new("Binary", ValueType::Binary, vec![None]),
    ]
}
