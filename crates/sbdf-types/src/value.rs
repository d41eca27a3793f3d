//! SBDF scalar value representation.

use bytes::Bytes;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;

use crate::value_type::ValueType;

/// A single SBDF cell or metadata value.
///
/// This is a closed tagged sum over the twelve SBDF value types. There is no
/// null variant: missing cells are tracked by the per-column validity mask,
/// and the value stored in their place is the type's missing-value sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum SbdfValue {
    /// Boolean value.
    Bool(bool),
    /// 32-bit signed integer.
    Int(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// 32-bit floating point.
    Float(f32),
    /// 64-bit floating point.
    Double(f64),
    /// Timestamp with millisecond resolution.
    DateTime(NaiveDateTime),
    /// Calendar date.
    Date(NaiveDate),
    /// Time of day with millisecond resolution.
    Time(NaiveTime),
    /// Signed duration with millisecond resolution.
    TimeSpan(TimeDelta),
    /// UTF-8 string.
    String(String),
    /// Opaque bytes.
    Binary(Bytes),
    /// Decimal value (Spotfire `Currency`).
    Decimal(Decimal),
}

impl SbdfValue {
    /// Get the value type tag of this value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::Int(_) => ValueType::Int,
            Self::Long(_) => ValueType::Long,
            Self::Float(_) => ValueType::Float,
            Self::Double(_) => ValueType::Double,
            Self::DateTime(_) => ValueType::DateTime,
            Self::Date(_) => ValueType::Date,
            Self::Time(_) => ValueType::Time,
            Self::TimeSpan(_) => ValueType::TimeSpan,
            Self::String(_) => ValueType::String,
            Self::Binary(_) => ValueType::Binary,
            Self::Decimal(_) => ValueType::Decimal,
        }
    }

    /// Get the value as a bool, if it is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as an i32, if it is one.
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as an i64, widening from `Int` if needed.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Long(v) => Some(*v),
            Self::Int(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Get the value as an f64, widening from `Float` if needed.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            Self::Float(v) => Some(f64::from(*v)),
            _ => None,
        }
    }

    /// Get the value as a string slice, if it is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Get the value as bytes, if it is binary.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(v) => Some(v),
            _ => None,
        }
    }

    /// Get the value as a decimal, if it is one.
    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as a timestamp, if it is one.
    #[must_use]
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::DateTime(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as a date, if it is one.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as a time of day, if it is one.
    #[must_use]
    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            Self::Time(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as a duration, if it is one.
    #[must_use]
    pub fn as_timespan(&self) -> Option<TimeDelta> {
        match self {
            Self::TimeSpan(v) => Some(*v),
            _ => None,
        }
    }
}

impl std::fmt::Display for SbdfValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::DateTime(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{v}"),
            Self::Time(v) => write!(f, "{v}"),
            Self::TimeSpan(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::Binary(v) => write!(f, "{} bytes", v.len()),
            Self::Decimal(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for SbdfValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for SbdfValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for SbdfValue {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<f32> for SbdfValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for SbdfValue {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for SbdfValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for SbdfValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<Bytes> for SbdfValue {
    fn from(v: Bytes) -> Self {
        Self::Binary(v)
    }
}

impl From<Decimal> for SbdfValue {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<NaiveDateTime> for SbdfValue {
    fn from(v: NaiveDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl From<NaiveDate> for SbdfValue {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<NaiveTime> for SbdfValue {
    fn from(v: NaiveTime) -> Self {
        Self::Time(v)
    }
}

impl From<TimeDelta> for SbdfValue {
    fn from(v: TimeDelta) -> Self {
        Self::TimeSpan(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_tags() {
        assert_eq!(SbdfValue::Bool(true).value_type(), ValueType::Bool);
        assert_eq!(SbdfValue::from("x").value_type(), ValueType::String);
        assert_eq!(SbdfValue::from(1i64).value_type(), ValueType::Long);
    }

    #[test]
    fn test_widening_accessors() {
        assert_eq!(SbdfValue::Int(7).as_i64(), Some(7));
        assert_eq!(SbdfValue::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(SbdfValue::Long(7).as_i32(), None);
    }
}
