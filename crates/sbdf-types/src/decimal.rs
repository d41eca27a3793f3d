//! IEEE-754 decimal128 codec for the SBDF `Currency` type.
//!
//! SBDF stores decimals as 16-byte Binary Integer Decimal records with a
//! biased exponent (bias 12320). Field placement, least-significant byte
//! first:
//!
//! - bytes 0..12 — unsigned 96-bit coefficient, little-endian
//! - bytes 12..14 and the top bit of byte 14 — padding
//! - byte 14 — low six bits of the biased exponent, shifted left one
//! - byte 15 — sign in the top bit, high six bits of the biased exponent below
//!
//! Only fourteen of the sixteen exponent bits are addressable by this
//! layout (bits 6 and 7 of the low byte are not stored), so a biased
//! exponent survives the round trip exactly when `biased & 0xC0 == 0`.
//! Every value a [`Decimal`] can hold (scale 0..=28, biased exponent
//! 12292..=12320) satisfies that; out-of-range exponents can only appear
//! when decoding foreign files and are rejected.

use rust_decimal::Decimal;

use crate::error::TypeError;
use crate::value_type::ValueType;

/// Exponent bias of the SBDF decimal128 encoding.
pub const EXPONENT_BIAS: i32 = 12320;

/// Size in bytes of an encoded decimal.
pub const ENCODED_LEN: usize = 16;

/// Encode a decimal into its 16-byte SBDF representation.
#[must_use]
pub fn encode(value: &Decimal) -> [u8; ENCODED_LEN] {
    let coefficient = value.mantissa().unsigned_abs();
    // scale is 0..=28, so the biased exponent always fits the split field
    let biased = (EXPONENT_BIAS - value.scale() as i32) as u16;

    let mut out = [0u8; ENCODED_LEN];
    out[..12].copy_from_slice(&coefficient.to_le_bytes()[..12]);
    out[14] = ((biased & 0x3F) << 1) as u8;
    out[15] = ((biased >> 8) & 0x3F) as u8;
    if value.is_sign_negative() {
        out[15] |= 0x80;
    }
    out
}

/// Decode a 16-byte SBDF decimal record.
///
/// Fails with the out-of-range kind when the stored exponent or coefficient
/// cannot be represented by [`Decimal`].
pub fn decode(data: &[u8]) -> Result<Decimal, TypeError> {
    if data.len() != ENCODED_LEN {
        return Err(TypeError::PayloadLength {
            value_type: ValueType::Decimal,
            expected: ENCODED_LEN,
            actual: data.len(),
        });
    }

    let mut coeff_bytes = [0u8; 16];
    coeff_bytes[..12].copy_from_slice(&data[..12]);
    let mut coefficient = u128::from_le_bytes(coeff_bytes);

    let negative = data[15] & 0x80 != 0;
    let biased = i32::from((data[14] >> 1) & 0x3F) | (i32::from(data[15] & 0x3F) << 8);
    let exponent = biased - EXPONENT_BIAS;

    let scale = if exponent > 0 {
        // Positive exponents have no direct Decimal representation; fold the
        // power of ten into the coefficient.
        for _ in 0..exponent {
            coefficient = coefficient
                .checked_mul(10)
                .filter(|c| *c < (1u128 << 96))
                .ok_or_else(|| decode_out_of_range(negative, coefficient, exponent))?;
        }
        0u32
    } else {
        let scale = exponent.unsigned_abs();
        if scale > 28 {
            return Err(decode_out_of_range(negative, coefficient, exponent));
        }
        scale
    };

    let signed = if negative {
        -(coefficient as i128)
    } else {
        coefficient as i128
    };
    Decimal::try_from_i128_with_scale(signed, scale)
        .map_err(|_| decode_out_of_range(negative, coefficient, exponent))
}

fn decode_out_of_range(negative: bool, coefficient: u128, exponent: i32) -> TypeError {
    let sign = if negative { "-" } else { "" };
    TypeError::out_of_range(format!("{sign}{coefficient}E{exponent}"), ValueType::Decimal)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    #[test]
    fn test_known_encoding() {
        // 1438.1565 = 14381565 * 10^-4; biased exponent 12316 = 0x301C
        let encoded = encode(&Decimal::from_str("1438.1565").unwrap());
        assert_eq!(
            encoded,
            [
                0xFD, 0x71, 0xDB, 0x00, 0x00, 0x00, 0x00, 0x00, // coefficient LE
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // coefficient + padding
                0x38, 0x30, // exponent split, positive sign
            ]
        );
    }

    #[test]
    fn test_sign_bit() {
        let encoded = encode(&Decimal::from_str("-1438.1565").unwrap());
        assert_eq!(encoded[15] & 0x80, 0x80);
        assert_eq!(decode(&encoded).unwrap(), Decimal::from_str("-1438.1565").unwrap());
    }

    #[test]
    fn test_roundtrip_fixture_values() {
        for text in ["1438.1565", "1538.493", "33.4455", "0", "-0.00000001"] {
            let value = Decimal::from_str(text).unwrap();
            assert_eq!(decode(&encode(&value)).unwrap(), value, "{text}");
        }
    }

    #[test]
    fn test_zero_carries_bias() {
        // Zero still stores the bias: biased exponent 12320 = 0x3020
        let encoded = encode(&Decimal::ZERO);
        assert_eq!(encoded[14], 0x40);
        assert_eq!(encoded[15], 0x30);
    }

    #[test]
    fn test_positive_exponent_folds_into_coefficient() {
        // 5E+2 decoded as 500
        let mut data = [0u8; 16];
        data[0] = 5;
        let biased = (EXPONENT_BIAS + 2) as u16;
        data[14] = ((biased & 0x3F) << 1) as u8;
        data[15] = ((biased >> 8) & 0x3F) as u8;
        assert_eq!(decode(&data).unwrap(), Decimal::from(500));
    }

    #[test]
    fn test_unrepresentable_exponent_errors() {
        // 1E+40 overflows the 96-bit coefficient when folded
        let mut data = [0u8; 16];
        data[..12].copy_from_slice(&(10u128.pow(28)).to_le_bytes()[..12]);
        let biased = (EXPONENT_BIAS + 40) as u16;
        data[14] = ((biased & 0x3F) << 1) as u8;
        data[15] = ((biased >> 8) & 0x3F) as u8;
        let err = decode(&data).unwrap_err();
        assert!(err.to_string().contains("outside representable range"));
    }

    #[test]
    fn test_scale_too_deep_errors() {
        let biased = (EXPONENT_BIAS - 29) as u16;
        let mut data = [0u8; 16];
        data[0] = 1;
        data[14] = ((biased & 0x3F) << 1) as u8;
        data[15] = ((biased >> 8) & 0x3F) as u8;
        assert!(decode(&data).is_err());
    }

    #[test]
    fn test_truncated_payload_errors() {
        assert!(decode(&[0u8; 15]).is_err());
    }

    proptest! {
        #[test]
        fn prop_roundtrip(mantissa in any::<i64>(), scale in 0u32..=28) {
            let value = Decimal::from_i128_with_scale(i128::from(mantissa), scale);
            prop_assert_eq!(decode(&encode(&value)).unwrap(), value);
        }
    }
}
