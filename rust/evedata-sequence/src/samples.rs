//! Scalar or array payload of a series.

use evedata_common::{Result, error::Error, verify_arg, verify_index};
use evedata_format::DataType;

use crate::{
    offsets::Offsets,
    values::{NativeValue, Values},
};

/// The samples of a series, one entry per position reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    /// One value per position reference.
    Scalar(Values),
    /// A variable-length vector of values per position reference. Row `i`
    /// occupies `values[offsets.range_at(i)]`.
    Array { offsets: Offsets, values: Values },
}

impl Samples {
    pub fn scalar<T: NativeValue>(values: Vec<T>) -> Samples {
        Samples::Scalar(T::wrap(values))
    }

    /// Flattens per-row vectors into an array payload.
    pub fn array<T: NativeValue>(rows: Vec<Vec<T>>) -> Samples {
        let offsets = Offsets::from_lengths(rows.iter().map(Vec::len));
        let values = rows.into_iter().flatten().collect::<Vec<T>>();
        Samples::Array {
            offsets,
            values: T::wrap(values),
        }
    }

    /// Creates an array payload from flat values and offsets.
    pub fn try_array(offsets: Offsets, values: Values) -> Result<Samples> {
        verify_arg!(offsets, offsets.last() == values.len());
        Ok(Samples::Array { offsets, values })
    }

    /// Returns `false` if the offsets of an array payload do not end at the
    /// number of stored values.
    pub fn is_consistent(&self) -> bool {
        match self {
            Samples::Scalar(_) => true,
            Samples::Array { offsets, values } => offsets.last() == values.len(),
        }
    }

    pub fn data_type(&self) -> DataType {
        self.values().data_type()
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Samples::Array { .. })
    }

    /// Number of rows (position references) in the payload.
    pub fn len(&self) -> usize {
        match self {
            Samples::Scalar(values) => values.len(),
            Samples::Array { offsets, .. } => offsets.item_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The underlying flat value buffer.
    pub fn values(&self) -> &Values {
        match self {
            Samples::Scalar(values) => values,
            Samples::Array { values, .. } => values,
        }
    }

    pub fn offsets(&self) -> Option<&Offsets> {
        match self {
            Samples::Scalar(_) => None,
            Samples::Array { offsets, .. } => Some(offsets),
        }
    }

    /// Number of elements in row `index`: `1` for scalar payloads.
    pub fn row_len(&self, index: usize) -> usize {
        match self {
            Samples::Scalar(_) => 1,
            Samples::Array { offsets, .. } => offsets.len_at(index),
        }
    }

    /// Number of columns reported in the dimension: the largest row length
    /// of array payloads, `1` for scalars.
    pub fn columns(&self) -> usize {
        match self {
            Samples::Scalar(_) => 1,
            Samples::Array { offsets, .. } => offsets.max_len(),
        }
    }

    /// Returns all values of a scalar payload.
    pub fn scalar_values<T: NativeValue>(&self, element: &str) -> Result<&[T]> {
        match self {
            Samples::Scalar(values) => values.try_as_slice(element),
            Samples::Array { .. } => Err(Error::shape_mismatch(element, false)),
        }
    }

    /// Returns the elements of row `index` of an array payload.
    pub fn array_row<T: NativeValue>(&self, element: &str, index: usize) -> Result<&[T]> {
        match self {
            Samples::Scalar(_) => Err(Error::shape_mismatch(element, true)),
            Samples::Array { offsets, values } => {
                verify_index!("row", index, offsets.item_count());
                let values = values.try_as_slice::<T>(element)?;
                Ok(&values[offsets.range_at(index)])
            }
        }
    }

    /// Reorders the rows according to `order` (a permutation of `0..len()`).
    pub(crate) fn reorder(&self, order: &[usize]) -> Samples {
        match self {
            Samples::Scalar(values) => {
                let slots = order
                    .iter()
                    .map(|&i| crate::values::TakeSlot::Index(i))
                    .collect::<Vec<_>>();
                Samples::Scalar(values.take(&slots))
            }
            Samples::Array { offsets, values } => Samples::Array {
                offsets: Offsets::from_lengths(order.iter().map(|&i| offsets.len_at(i))),
                values: values.take_ranges(order.iter().map(|&i| offsets.range_at(i))),
            },
        }
    }
}
