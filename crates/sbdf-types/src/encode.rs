//! Scalar encoding into the SBDF byte representation.
//!
//! Every encode is performed against a declared [`ValueType`]: the type a
//! column or metadata entry announces on the wire. An exact tag match always
//! encodes; `Int`/`Long` and `Float`/`Double` convert across the pair
//! (range-checked where narrowing); any other mismatch is rejected here,
//! which is where an incompatible user-declared column type surfaces.

use bytes::BufMut;

use crate::decimal;
use crate::error::TypeError;
use crate::time;
use crate::value::SbdfValue;
use crate::value_type::ValueType;

/// Encode `value` as `declared` into `buf`.
///
/// Fixed-width types append exactly [`ValueType::packed_size`] bytes; array
/// types append the raw payload with no length prefix (framing is the
/// caller's concern).
pub fn encode_value(
    value: &SbdfValue,
    declared: ValueType,
    buf: &mut impl BufMut,
) -> Result<(), TypeError> {
    match (declared, value) {
        (ValueType::Bool, SbdfValue::Bool(v)) => buf.put_u8(u8::from(*v)),
        (ValueType::Int, SbdfValue::Int(v)) => buf.put_i32_le(*v),
        (ValueType::Int, SbdfValue::Long(v)) => {
            let narrowed =
                i32::try_from(*v).map_err(|_| TypeError::out_of_range(v, ValueType::Int))?;
            buf.put_i32_le(narrowed);
        }
        (ValueType::Long, SbdfValue::Long(v)) => buf.put_i64_le(*v),
        (ValueType::Long, SbdfValue::Int(v)) => buf.put_i64_le(i64::from(*v)),
        (ValueType::Float, SbdfValue::Float(v)) => buf.put_f32_le(*v),
        (ValueType::Float, SbdfValue::Double(v)) => buf.put_f32_le(*v as f32),
        (ValueType::Double, SbdfValue::Double(v)) => buf.put_f64_le(*v),
        (ValueType::Double, SbdfValue::Float(v)) => buf.put_f64_le(f64::from(*v)),
        (ValueType::DateTime, SbdfValue::DateTime(v)) => {
            buf.put_i64_le(time::datetime_to_millis(v));
        }
        (ValueType::Date, SbdfValue::Date(v)) => buf.put_i64_le(time::date_to_millis(v)),
        (ValueType::Time, SbdfValue::Time(v)) => buf.put_i64_le(time::time_to_millis(v)),
        (ValueType::TimeSpan, SbdfValue::TimeSpan(v)) => buf.put_i64_le(v.num_milliseconds()),
        (ValueType::String, SbdfValue::String(v)) => buf.put_slice(v.as_bytes()),
        (ValueType::Binary, SbdfValue::Binary(v)) => buf.put_slice(v),
        (ValueType::Decimal, SbdfValue::Decimal(v)) => buf.put_slice(&decimal::encode(v)),
        (declared, value) => return Err(TypeError::incompatible(value, declared)),
    }
    Ok(())
}

/// Byte length `value` will occupy when encoded as `declared`.
pub fn encoded_len(value: &SbdfValue, declared: ValueType) -> Result<usize, TypeError> {
    match declared.packed_size() {
        Some(size) => Ok(size),
        None => match (declared, value) {
            (ValueType::String, SbdfValue::String(v)) => Ok(v.len()),
            (ValueType::Binary, SbdfValue::Binary(v)) => Ok(v.len()),
            _ => Err(TypeError::incompatible(value, declared)),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use chrono::NaiveDate;

    fn encoded(value: &SbdfValue, declared: ValueType) -> Vec<u8> {
        let mut buf = BytesMut::new();
        encode_value(value, declared, &mut buf).unwrap();
        buf.to_vec()
    }

    #[test]
    fn test_encode_int_little_endian() {
        assert_eq!(encoded(&SbdfValue::Int(69), ValueType::Int), [69, 0, 0, 0]);
    }

    #[test]
    fn test_encode_long() {
        assert_eq!(
            encoded(&SbdfValue::Long(0x0102030405060708), ValueType::Long),
            [0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
        );
    }

    #[test]
    fn test_encode_bool() {
        assert_eq!(encoded(&SbdfValue::Bool(true), ValueType::Bool), [1]);
        assert_eq!(encoded(&SbdfValue::Bool(false), ValueType::Bool), [0]);
    }

    #[test]
    fn test_int_long_conversions() {
        assert_eq!(
            encoded(&SbdfValue::Int(3), ValueType::Long),
            [3, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(encoded(&SbdfValue::Long(3), ValueType::Int), [3, 0, 0, 0]);
    }

    #[test]
    fn test_narrowing_out_of_range() {
        let err = encode_value(
            &SbdfValue::Long(500_400_300_200),
            ValueType::Int,
            &mut BytesMut::new(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("outside representable range"));
    }

    #[test]
    fn test_encode_date_millis() {
        // 1583-01-02 is 577,814 days past the epoch
        let date = NaiveDate::from_ymd_opt(1583, 1, 2).unwrap();
        let bytes = encoded(&SbdfValue::Date(date), ValueType::Date);
        let millis = i64::from_le_bytes(bytes.try_into().unwrap());
        assert_eq!(millis, 577_814 * 86_400_000);
    }

    #[test]
    fn test_incompatible_declared_type() {
        // a datetime column declared String must fail in the encoder
        let value = SbdfValue::DateTime(crate::time::epoch());
        assert!(encode_value(&value, ValueType::String, &mut BytesMut::new()).is_err());
    }

    #[test]
    fn test_encoded_len_variable() {
        assert_eq!(encoded_len(&SbdfValue::from("The"), ValueType::String).unwrap(), 3);
        assert_eq!(encoded_len(&SbdfValue::Int(1), ValueType::Int).unwrap(), 4);
    }
}
