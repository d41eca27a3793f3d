//! Value conversion error types.

use thiserror::Error;

use crate::value_type::ValueType;

/// Errors that can occur while converting values to or from their SBDF
/// byte representation.
#[derive(Debug, Error)]
pub enum TypeError {
    /// The wire carried a type id outside the closed set.
    #[error("unknown typeid")]
    UnknownTypeId(u8),

    /// A value cannot be represented in the declared Spotfire type.
    #[error("cannot convert '{value}' to Spotfire {spotfire_type} type; value is outside representable range")]
    OutOfRange {
        /// Display form of the offending value.
        value: String,
        /// Spotfire name of the declared type.
        spotfire_type: &'static str,
    },

    /// A value's tag is incompatible with the declared type.
    #[error("cannot convert '{value}' to Spotfire {spotfire_type} type; value is outside representable range")]
    Incompatible {
        /// Display form of the offending value.
        value: String,
        /// Spotfire name of the declared type.
        spotfire_type: &'static str,
    },

    /// String data was not valid UTF-8.
    #[error("invalid string encoding: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// A fixed-size payload had the wrong length.
    #[error("invalid payload length for {value_type}: expected {expected} bytes, got {actual}")]
    PayloadLength {
        /// The declared value type.
        value_type: ValueType,
        /// Bytes required by the type.
        expected: usize,
        /// Bytes actually present.
        actual: usize,
    },
}

impl TypeError {
    /// Build an [`TypeError::OutOfRange`] for a displayable value.
    pub fn out_of_range(value: impl std::fmt::Display, value_type: ValueType) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
            spotfire_type: value_type.spotfire_name(),
        }
    }

    /// Build an [`TypeError::Incompatible`] for a displayable value.
    pub fn incompatible(value: impl std::fmt::Display, value_type: ValueType) -> Self {
        Self::Incompatible {
            value: value.to_string(),
            spotfire_type: value_type.spotfire_name(),
        }
    }
}
