//! The consumer-facing SBDF error type.

use thiserror::Error;

/// Errors surfaced by SBDF import and export.
///
/// Every failure in the lower layers (wire format, value conversion) funnels
/// into this type; errors are fatal to the enclosing file operation and
/// nothing is retried. The only non-fatal channel is the `tracing::warn!`
/// emitted for unrecognized user type overrides.
#[derive(Debug, Error)]
pub enum SbdfError {
    /// Wire format failure.
    #[error(transparent)]
    Format(#[from] sbdf_format::FormatError),

    /// Scalar conversion failure.
    #[error(transparent)]
    Type(#[from] sbdf_types::TypeError),

    /// A column contained no non-missing cells and no declared type.
    #[error("cannot determine type for {description}; all values are missing")]
    AllValuesMissing {
        /// Human description of the column or sequence.
        description: String,
    },

    /// A column's non-missing cells carry more than one value type.
    #[error("types in {description} do not match")]
    TypesDoNotMatch {
        /// Human description of the column or sequence.
        description: String,
    },

    /// A dtype or type name has no SBDF mapping.
    #[error("unknown type '{type_name}' in {description}")]
    UnknownType {
        /// The unmappable type name.
        type_name: String,
        /// Human description of the column or sequence.
        description: String,
    },

    /// Columns of one table disagree on row count.
    #[error("column '{column}' has inconsistent column length")]
    InconsistentColumnLength {
        /// The offending column.
        column: String,
    },

    /// Two columns share a name.
    #[error("table does not have unique column names")]
    DuplicateColumnName {
        /// The duplicated name.
        name: String,
    },

    /// A validity mask does not cover the column's values one-to-one.
    #[error("the validity mask length doesn't match the number of values in column '{column}'")]
    MaskLengthMismatch {
        /// The offending column.
        column: String,
    },
}
