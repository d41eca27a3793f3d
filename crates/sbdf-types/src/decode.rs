//! Scalar decoding from the SBDF byte representation.

use bytes::Bytes;

use crate::decimal;
use crate::error::TypeError;
use crate::time;
use crate::value::SbdfValue;
use crate::value_type::ValueType;

/// Decode a scalar of type `declared` from `data`.
///
/// For fixed-width types `data` must hold exactly [`ValueType::packed_size`]
/// bytes; for array types it is the full payload (the caller has already
/// consumed the length prefix).
pub fn decode_value(declared: ValueType, data: &[u8]) -> Result<SbdfValue, TypeError> {
    if let Some(size) = declared.packed_size() {
        if data.len() != size {
            return Err(TypeError::PayloadLength {
                value_type: declared,
                expected: size,
                actual: data.len(),
            });
        }
    }
    match declared {
        ValueType::Bool => Ok(SbdfValue::Bool(data[0] != 0)),
        ValueType::Int => Ok(SbdfValue::Int(i32::from_le_bytes(fixed(data)?))),
        ValueType::Long => Ok(SbdfValue::Long(i64::from_le_bytes(fixed(data)?))),
        ValueType::Float => Ok(SbdfValue::Float(f32::from_le_bytes(fixed(data)?))),
        ValueType::Double => Ok(SbdfValue::Double(f64::from_le_bytes(fixed(data)?))),
        ValueType::DateTime => {
            let millis = i64::from_le_bytes(fixed(data)?);
            Ok(SbdfValue::DateTime(time::datetime_from_millis(millis)?))
        }
        ValueType::Date => {
            let millis = i64::from_le_bytes(fixed(data)?);
            Ok(SbdfValue::Date(time::date_from_millis(millis)?))
        }
        ValueType::Time => {
            let millis = i64::from_le_bytes(fixed(data)?);
            Ok(SbdfValue::Time(time::time_from_millis(millis)?))
        }
        ValueType::TimeSpan => {
            let millis = i64::from_le_bytes(fixed(data)?);
            Ok(SbdfValue::TimeSpan(chrono::TimeDelta::milliseconds(millis)))
        }
        ValueType::String => Ok(SbdfValue::String(String::from_utf8(data.to_vec())?)),
        ValueType::Binary => Ok(SbdfValue::Binary(Bytes::copy_from_slice(data))),
        ValueType::Decimal => Ok(SbdfValue::Decimal(decimal::decode(data)?)),
        ValueType::InternalByte => Err(TypeError::UnknownTypeId(declared as u8)),
    }
}

fn fixed<const N: usize>(data: &[u8]) -> Result<[u8; N], TypeError> {
    data.try_into().map_err(|_| TypeError::PayloadLength {
        value_type: ValueType::Long,
        expected: N,
        actual: data.len(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use chrono::{NaiveDate, NaiveTime, TimeDelta};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    use crate::encode::encode_value;

    fn roundtrip(value: SbdfValue) {
        let declared = value.value_type();
        let mut buf = BytesMut::new();
        encode_value(&value, declared, &mut buf).unwrap();
        assert_eq!(decode_value(declared, &buf).unwrap(), value);
    }

    #[test]
    fn test_fixed_type_roundtrips() {
        roundtrip(SbdfValue::Bool(true));
        roundtrip(SbdfValue::Int(-7));
        roundtrip(SbdfValue::Long(19118));
        roundtrip(SbdfValue::Float(12.0));
        roundtrip(SbdfValue::Double(28661.92));
        roundtrip(SbdfValue::Decimal(Decimal::from_str("1538.493").unwrap()));
    }

    #[test]
    fn test_temporal_roundtrips() {
        roundtrip(SbdfValue::DateTime(
            NaiveDate::from_ymd_opt(1583, 11, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        ));
        roundtrip(SbdfValue::Date(NaiveDate::from_ymd_opt(1583, 1, 2).unwrap()));
        roundtrip(SbdfValue::Time(NaiveTime::from_hms_opt(21, 25, 40).unwrap()));
        roundtrip(SbdfValue::TimeSpan(TimeDelta::milliseconds(504_300)));
    }

    #[test]
    fn test_array_type_roundtrips() {
        roundtrip(SbdfValue::from("The quick brown fox"));
        roundtrip(SbdfValue::Binary(Bytes::from_static(&[0x7C, 0x7D, 0x7E, 0x7F])));
        roundtrip(SbdfValue::from(""));
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        assert!(matches!(
            decode_value(ValueType::String, &[0xFF, 0xFE]),
            Err(TypeError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn test_wrong_payload_length() {
        assert!(decode_value(ValueType::Int, &[1, 2]).is_err());
    }

    #[test]
    fn test_bool_decodes_any_nonzero() {
        assert_eq!(decode_value(ValueType::Bool, &[2]).unwrap(), SbdfValue::Bool(true));
    }
}
