//! Spotfire type inference for user-supplied columns.
//!
//! Two routes mirror the two ways a host container describes a column:
//! per-cell tags ([`infer_value_type`]) and a container dtype name
//! ([`infer_from_dtype`]). A recognized user-declared Spotfire type name
//! overrides both; an unrecognized one is warned about and ignored.

use sbdf_types::{SbdfValue, ValueType};

use crate::error::SbdfError;

/// Infer the SBDF type of a sequence of optional cells.
///
/// Missing cells are ignored. Fails when every cell is missing or when the
/// remaining cells carry more than one value type.
pub fn infer_value_type(
    cells: &[Option<SbdfValue>],
    description: &str,
) -> Result<ValueType, SbdfError> {
    let mut present = cells.iter().flatten();
    let first = present.next().ok_or_else(|| SbdfError::AllValuesMissing {
        description: description.to_owned(),
    })?;
    let value_type = first.value_type();
    if present.any(|value| value.value_type() != value_type) {
        return Err(SbdfError::TypesDoNotMatch {
            description: description.to_owned(),
        });
    }
    Ok(value_type)
}

/// Infer the SBDF type from a container dtype name.
///
/// `object` and `category` dtypes carry no element type and degrade to
/// per-cell inference over the materialized cells.
pub fn infer_from_dtype(
    dtype: &str,
    cells: &[Option<SbdfValue>],
    description: &str,
) -> Result<ValueType, SbdfError> {
    if dtype == "object" || dtype == "category" {
        return infer_value_type(cells, description);
    }
    ValueType::from_dtype_name(dtype).ok_or_else(|| SbdfError::UnknownType {
        type_name: dtype.to_owned(),
        description: description.to_owned(),
    })
}

/// Resolve a user-declared Spotfire type name.
///
/// Unrecognized names are reported on the warning channel and ignored, so a
/// bad override degrades to inference instead of failing the export.
pub fn resolve_declared_type(name: &str, column: &str) -> Option<ValueType> {
    let resolved = ValueType::from_spotfire_name(name);
    if resolved.is_none() {
        tracing::warn!("Spotfire type '{name}' for column '{column}' not recognized");
    }
    resolved
}

/// Promote an `Integer` column to `LongInteger` when any cell overflows 32
/// bits.
#[must_use]
pub(crate) fn promote_for_write(value_type: ValueType, values: &[SbdfValue]) -> ValueType {
    if value_type == ValueType::Int {
        let overflows = values.iter().any(|value| {
            value
                .as_i64()
                .is_some_and(|v| i32::try_from(v).is_err())
        });
        if overflows {
            return ValueType::Long;
        }
    }
    value_type
}
