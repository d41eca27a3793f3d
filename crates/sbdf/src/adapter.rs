//! Host-container adapter.
//!
//! The codec never depends on any particular data-frame library. A host
//! exposes its columns through [`ColumnSource`]; the adapter resolves each
//! column's SBDF type (declared override first, then dtype, then per-cell
//! inference) and materializes a [`Column`].

use sbdf_format::Metadata;
use sbdf_types::SbdfValue;

use crate::error::SbdfError;
use crate::infer;
use crate::table::{Column, Table};

/// A column as seen by a host container.
///
/// `cells` is the only mandatory capability; the hints default to absent.
pub trait ColumnSource {
    /// The column name.
    fn name(&self) -> String;

    /// The container's dtype name for this column, if it has one.
    fn dtype(&self) -> Option<String> {
        None
    }

    /// A user-declared Spotfire type name, if one was attached.
    fn spotfire_type(&self) -> Option<String> {
        None
    }

    /// User metadata to attach to the column.
    fn metadata(&self) -> Metadata {
        Metadata::new()
    }

    /// The cells in row order; `None` marks a missing cell.
    fn cells(&self) -> Vec<Option<SbdfValue>>;
}

impl Column {
    /// Build a column from a host container column.
    pub fn from_source(source: &impl ColumnSource) -> Result<Self, SbdfError> {
        let name = source.name();
        let description = format!("column '{name}'");
        let cells = source.cells();

        let declared = source
            .spotfire_type()
            .and_then(|type_name| infer::resolve_declared_type(&type_name, &name));
        let value_type = match declared {
            Some(value_type) => value_type,
            None => match source.dtype() {
                Some(dtype) => infer::infer_from_dtype(&dtype, &cells, &description)?,
                None => infer::infer_value_type(&cells, &description)?,
            },
        };

        let mut column = Column::new(name, value_type, cells);
        column.set_metadata(source.metadata());
        Ok(column)
    }
}

impl Table {
    /// Build a table from host container columns, in order.
    pub fn from_sources<S, I>(sources: I) -> Result<Self, SbdfError>
    where
        S: ColumnSource,
        I: IntoIterator<Item = S>,
    {
        let columns = sources
            .into_iter()
            .map(|source| Column::from_source(&source))
            .collect::<Result<Vec<_>, _>>()?;
        Table::new(columns)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sbdf_types::ValueType;

    struct VecSource {
        name: &'static str,
        dtype: Option<&'static str>,
        spotfire_type: Option<&'static str>,
        cells: Vec<Option<SbdfValue>>,
    }

    impl ColumnSource for VecSource {
        fn name(&self) -> String {
            self.name.to_owned()
        }

        fn dtype(&self) -> Option<String> {
            self.dtype.map(str::to_owned)
        }

        fn spotfire_type(&self) -> Option<String> {
            self.spotfire_type.map(str::to_owned)
        }

        fn cells(&self) -> Vec<Option<SbdfValue>> {
            self.cells.clone()
        }
    }

    #[test]
    fn test_inference_from_cells() {
        let source = VecSource {
            name: "x",
            dtype: None,
            spotfire_type: None,
            cells: vec![Some(SbdfValue::Long(1)), None],
        };
        let column = Column::from_source(&source).unwrap();
        assert_eq!(column.value_type(), ValueType::Long);
        assert_eq!(column.row_count(), 2);
    }

    #[test]
    fn test_declared_override_wins_over_dtype() {
        let source = VecSource {
            name: "x",
            dtype: Some("int64"),
            spotfire_type: Some("Integer"),
            cells: vec![Some(SbdfValue::Long(1))],
        };
        let column = Column::from_source(&source).unwrap();
        assert_eq!(column.value_type(), ValueType::Int);
    }

    #[test]
    fn test_unrecognized_override_degrades_to_inference() {
        let source = VecSource {
            name: "x",
            dtype: None,
            spotfire_type: Some("Unknown"),
            cells: vec![Some(SbdfValue::Long(1))],
        };
        let column = Column::from_source(&source).unwrap();
        assert_eq!(column.value_type(), ValueType::Long);
    }

    #[test]
    fn test_table_from_sources() {
        let sources = vec![
            VecSource {
                name: "a",
                dtype: Some("float64"),
                spotfire_type: None,
                cells: vec![Some(SbdfValue::Double(1.0))],
            },
            VecSource {
                name: "b",
                dtype: None,
                spotfire_type: None,
                cells: vec![Some(SbdfValue::from("x"))],
            },
        ];
        let table = Table::from_sources(sources).unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column("a").unwrap().value_type(), ValueType::Double);
    }
}
