//! The result of a join: one typed column per input series over a shared
//! row index.

use std::sync::Arc;

use evedata_common::{Result, error::Error, verify_arg, verify_index};
use evedata_format::{DataType, FillRule, MetaData, PosRef, count_to_i32};
use evedata_sequence::{
    AverageData, NativeValue, Samples, Series, StdDeviationData, TakeSlot, Values,
    offsets::Offsets, presence::Presence,
};

use crate::{fill::FillPolicy, position_index::PositionIndex};

/// Storage of one joined column. Every column has one slot per table row;
/// absent slots hold a placeholder and are flagged in `presence`.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Scalar {
        values: Values,
        presence: Presence,
    },
    /// Row `i` holds `values[offsets.range_at(i)]`; absent rows are empty.
    Array {
        offsets: Offsets,
        values: Values,
        presence: Presence,
    },
}

impl ColumnData {
    pub fn values(&self) -> &Values {
        match self {
            ColumnData::Scalar { values, .. } | ColumnData::Array { values, .. } => values,
        }
    }

    pub fn presence(&self) -> &Presence {
        match self {
            ColumnData::Scalar { presence, .. } | ColumnData::Array { presence, .. } => presence,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.presence().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How the cells of a column were resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillSummary {
    /// Cells with a sample at the row's position reference.
    pub exact: usize,
    /// Cells repeating an earlier sample.
    pub carried: usize,
    /// Cells filled with NaN.
    pub nan_filled: usize,
    /// Cells without a value.
    pub absent: usize,
}

impl FillSummary {
    pub fn total(&self) -> usize {
        self.exact + self.carried + self.nan_filled + self.absent
    }

    /// `true` if every cell holds an exact sample.
    pub fn is_exact(&self) -> bool {
        self.exact == self.total()
    }
}

/// One column of a [`JoinedTable`], sourced from exactly one input series.
#[derive(Debug, Clone)]
pub struct Column {
    pub(crate) meta: Arc<MetaData>,
    pub(crate) data: ColumnData,
    pub(crate) policy: FillPolicy,
    pub(crate) summary: FillSummary,
    pub(crate) average: Option<Arc<AverageData>>,
    pub(crate) std_deviation: Option<Arc<StdDeviationData>>,
}

impl Column {
    /// Metadata of the source series.
    pub fn meta(&self) -> &Arc<MetaData> {
        &self.meta
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn data_type(&self) -> DataType {
        self.data.values().data_type()
    }

    pub fn is_array(&self) -> bool {
        matches!(self.data, ColumnData::Array { .. })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn presence(&self) -> &Presence {
        self.data.presence()
    }

    /// `true` if the cell at `row` holds a value (exact, carried or NaN).
    pub fn is_present(&self, row: usize) -> Result<bool> {
        verify_index!("row", row, self.len());
        Ok(self.presence().is_valid(row))
    }

    /// The policy that was applied to the missing cells of this column.
    pub fn fill_policy(&self) -> FillPolicy {
        self.policy
    }

    pub fn fill_summary(&self) -> &FillSummary {
        &self.summary
    }

    pub fn average(&self) -> Option<&Arc<AverageData>> {
        self.average.as_ref()
    }

    pub fn std_deviation(&self) -> Option<&Arc<StdDeviationData>> {
        self.std_deviation.as_ref()
    }

    /// All row values of a scalar column. Absent rows hold the type's default
    /// value; consult [`Column::presence`] to tell them apart.
    pub fn values<T: NativeValue>(&self) -> Result<&[T]> {
        match &self.data {
            ColumnData::Scalar { values, .. } => values.try_as_slice(&self.meta.id),
            ColumnData::Array { .. } => Err(Error::shape_mismatch(&self.meta.id, false)),
        }
    }

    /// The value at `row` of a scalar column, `None` if absent.
    pub fn value<T: NativeValue>(&self, row: usize) -> Result<Option<T>> {
        let values = self.values::<T>()?;
        verify_index!("row", row, values.len());
        Ok(self.presence().is_valid(row).then(|| values[row].clone()))
    }

    /// The elements at `row` of an array column, `None` if absent.
    pub fn array<T: NativeValue>(&self, row: usize) -> Result<Option<&[T]>> {
        match &self.data {
            ColumnData::Scalar { .. } => Err(Error::shape_mismatch(&self.meta.id, true)),
            ColumnData::Array {
                offsets,
                values,
                presence,
            } => {
                verify_index!("row", row, presence.len());
                if !presence.is_valid(row) {
                    return Ok(None);
                }
                let values = values.try_as_slice::<T>(&self.meta.id)?;
                Ok(Some(&values[offsets.range_at(row)]))
            }
        }
    }

    /// Number of values in the column: the row count for scalar data, `-1`
    /// for array data. Saturates at `i32::MAX`.
    pub fn value_count(&self) -> i32 {
        match self.data {
            ColumnData::Scalar { .. } => count_to_i32(self.len()),
            ColumnData::Array { .. } => -1,
        }
    }

    /// Number of array elements at `row`; `-1` for scalar data or an absent
    /// row. Saturates at `i32::MAX`.
    pub fn array_value_count(&self, row: usize) -> Result<i32> {
        verify_index!("row", row, self.len());
        match &self.data {
            ColumnData::Scalar { .. } => Ok(-1),
            ColumnData::Array {
                offsets, presence, ..
            } => Ok(if presence.is_valid(row) {
                count_to_i32(offsets.len_at(row))
            } else {
                -1
            }),
        }
    }

    /// Rebuilds a series from the present cells of this column, keyed by the
    /// table's row position references.
    ///
    /// Companion bookkeeping is aligned to the source series, not to the
    /// table rows, and is not carried over.
    pub fn to_series(&self, pos_refs: &[PosRef]) -> Result<Series> {
        verify_arg!(pos_refs, pos_refs.len() == self.len());
        let rows = (0..self.len())
            .filter(|&row| self.presence().is_valid(row))
            .collect::<Vec<_>>();
        let series_refs = rows.iter().map(|&row| pos_refs[row]).collect::<Vec<_>>();
        let samples = match &self.data {
            ColumnData::Scalar { values, .. } => {
                let slots = rows
                    .iter()
                    .map(|&row| TakeSlot::Index(row))
                    .collect::<Vec<_>>();
                Samples::Scalar(values.take(&slots))
            }
            ColumnData::Array {
                offsets, values, ..
            } => Samples::Array {
                offsets: Offsets::from_lengths(rows.iter().map(|&row| offsets.len_at(row))),
                values: values.take_ranges(rows.iter().map(|&row| offsets.range_at(row))),
            },
        };
        Series::try_new(self.meta.clone(), series_refs, samples)
    }
}

/// Rectangular, per-column typed result of aligning series under one
/// [`FillRule`].
#[derive(Debug, Clone)]
pub struct JoinedTable {
    pub(crate) index: PositionIndex,
    pub(crate) columns: Vec<Column>,
    pub(crate) rule: FillRule,
}

impl JoinedTable {
    /// A table with no rows and no columns.
    pub fn empty(rule: FillRule) -> JoinedTable {
        JoinedTable {
            index: PositionIndex::default(),
            columns: Vec::new(),
            rule,
        }
    }

    pub fn fill_rule(&self) -> FillRule {
        self.rule
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows (the size of every column).
    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position reference of every row.
    pub fn pos_refs(&self) -> &[PosRef] {
        self.index.as_slice()
    }

    pub fn index(&self) -> &PositionIndex {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, col: usize) -> Result<&Column> {
        verify_index!("column", col, self.columns.len());
        Ok(&self.columns[col])
    }

    /// Index of the first column sourced from the device with this XML-ID.
    pub fn find_column(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.meta.id == id)
    }

    pub fn metadata(&self, col: usize) -> Result<&Arc<MetaData>> {
        self.column(col).map(Column::meta)
    }

    pub fn column_type(&self, col: usize) -> Result<DataType> {
        self.column(col).map(Column::data_type)
    }

    /// All row values of a scalar column.
    pub fn values<T: NativeValue>(&self, col: usize) -> Result<&[T]> {
        self.column(col)?.values()
    }

    /// The value at (`col`, `row`), `None` if the cell is absent.
    pub fn value<T: NativeValue>(&self, col: usize, row: usize) -> Result<Option<T>> {
        self.column(col)?.value(row)
    }

    /// The array at (`col`, `row`), `None` if the cell is absent.
    pub fn array<T: NativeValue>(&self, col: usize, row: usize) -> Result<Option<&[T]>> {
        self.column(col)?.array(row)
    }

    /// Number of values of `col`: the row count, or `-1` for array data.
    pub fn column_value_count(&self, col: usize) -> Result<i32> {
        self.column(col).map(Column::value_count)
    }

    /// Number of array elements at (`col`, `row`), `-1` for scalar data or an
    /// absent cell.
    pub fn array_value_count(&self, col: usize, row: usize) -> Result<i32> {
        self.column(col)?.array_value_count(row)
    }

    /// Converts every column into a fresh series holding its present cells,
    /// keyed by the row position references.
    pub fn to_series(&self) -> Result<Vec<Series>> {
        self.columns
            .iter()
            .map(|column| column.to_series(self.pos_refs()))
            .collect()
    }
}
