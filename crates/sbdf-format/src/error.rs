//! Wire format error types.

use thiserror::Error;

/// Errors that can occur while reading or writing the SBDF wire format.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The two magic bytes that open every section were not found.
    #[error("the SBDF magic number wasn't found")]
    MissingMagic,

    /// A section id other than the expected one was read.
    #[error("unexpected section id")]
    UnexpectedSectionId {
        /// The id found on the wire.
        actual: u8,
    },

    /// The file header declares a version this implementation cannot read.
    #[error("unsupported file version {major}.{minor}")]
    UnsupportedVersion {
        /// Major version from the header.
        major: u8,
        /// Minor version from the header.
        minor: u8,
    },

    /// A count or length prefix was negative or otherwise malformed.
    #[error("the number of elements is incorrect")]
    InvalidElementCount,

    /// A table slice's column count disagrees with the table metadata.
    #[error("the number of the columnslice doesn't match the number of the columns of the metadata")]
    ColumnCountMismatch {
        /// Columns declared by the table metadata.
        expected: usize,
        /// Columns present in the slice.
        actual: usize,
    },

    /// A value array carried an encoding id outside the known set.
    #[error("unknown valuearray encoding")]
    UnknownEncoding(u8),

    /// Run-length arrays can be skipped but not materialized.
    #[error("run-length encoded value arrays cannot be materialized")]
    RunLengthUnsupported,

    /// Column metadata is structurally wrong (missing or mistyped mandatory
    /// fields, or defaults/types that disagree across columns).
    #[error("the metadata is incorrect")]
    InvalidMetadata,

    /// A sealed metadata block was mutated.
    #[error("the metadata is readonly and may not be modified")]
    MetadataReadOnly,

    /// A metadata entry with the same name is already present.
    #[error("the metadata with the given name already exists")]
    MetadataExists {
        /// The duplicated name.
        name: String,
    },

    /// A column slice property with the same name is already present.
    #[error("the property with the given name already exists")]
    PropertyExists {
        /// The duplicated name.
        name: String,
    },

    /// A metadata value and its default carry different value types.
    #[error("the valuetypes of the arguments must be equal")]
    ValueTypeMismatch,

    /// Scalar conversion failure.
    #[error(transparent)]
    Type(#[from] sbdf_types::TypeError),

    /// Underlying stream failure.
    #[error("i/o error")]
    Io(#[from] std::io::Error),
}
