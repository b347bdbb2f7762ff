//! Conversion of joined columns into Arrow arrays.
//!
//! Absent cells become Arrow nulls; NaN-filled cells stay NaN values. Array
//! columns become `ListArray`s of non-nullable elements.

use std::sync::Arc;

use arrow_array::{
    ArrayRef, ArrowPrimitiveType, ListArray, PrimitiveArray, StringArray,
    types::{
        Float32Type, Float64Type, Int8Type, Int16Type, Int32Type, Int64Type, UInt8Type,
        UInt16Type, UInt32Type, UInt64Type,
    },
};
use arrow_buffer::{NullBuffer, OffsetBuffer, ScalarBuffer};
use evedata_common::{Result, error::Error};
use evedata_join::{Column, ColumnData};
use evedata_sequence::{Samples, Values, offsets::Offsets, presence::Presence};

use crate::evedata_to_arrow_schema::{data_type_to_arrow, list_item_field};

/// Trait for converting a type into an Arrow [`ArrayRef`].
pub trait IntoArrowArray {
    /// Converts `self` into an Arrow [`ArrayRef`].
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion is not supported or fails.
    fn into_arrow_array(self) -> Result<ArrayRef>;
}

impl IntoArrowArray for &ColumnData {
    fn into_arrow_array(self) -> Result<ArrayRef> {
        match self {
            ColumnData::Scalar { values, presence } => {
                values_to_array(values, null_buffer(presence))
            }
            ColumnData::Array {
                offsets,
                values,
                presence,
            } => list_array(offsets, values, null_buffer(presence)),
        }
    }
}

impl IntoArrowArray for &Column {
    fn into_arrow_array(self) -> Result<ArrayRef> {
        self.data().into_arrow_array()
    }
}

/// The samples of a series, without nulls.
impl IntoArrowArray for &Samples {
    fn into_arrow_array(self) -> Result<ArrayRef> {
        match self {
            Samples::Scalar(values) => values_to_array(values, None),
            Samples::Array { offsets, values } => list_array(offsets, values, None),
        }
    }
}

/// Validity buffer of `presence`; `None` when every slot is present.
fn null_buffer(presence: &Presence) -> Option<NullBuffer> {
    presence.to_validity().map(NullBuffer::from)
}

fn list_array(offsets: &Offsets, values: &Values, nulls: Option<NullBuffer>) -> Result<ArrayRef> {
    let items = values_to_array(values, None)?;
    let field = list_item_field(data_type_to_arrow(values.data_type())?);
    ListArray::try_new(field, list_offsets(offsets)?, items, nulls)
        .map(|arr| Arc::new(arr) as ArrayRef)
        .map_err(|e| Error::arrow("new list array", e))
}

fn list_offsets(offsets: &Offsets) -> Result<OffsetBuffer<i32>> {
    let offsets = offsets
        .as_slice()
        .iter()
        .map(|&offset| i32::try_from(offset))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| Error::invalid_arg("offsets", "array column exceeds i32 offsets"))?;
    Ok(OffsetBuffer::new(ScalarBuffer::from(offsets)))
}

fn values_to_array(values: &Values, nulls: Option<NullBuffer>) -> Result<ArrayRef> {
    match values {
        Values::String(v) => {
            let (offsets, data, _) = StringArray::from_iter_values(v).into_parts();
            StringArray::try_new(offsets, data, nulls)
                .map(|arr| Arc::new(arr) as ArrayRef)
                .map_err(|e| Error::arrow("new string array", e))
        }
        Values::Int8(v) => make_primitive_array::<Int8Type>(v, nulls),
        Values::Int16(v) => make_primitive_array::<Int16Type>(v, nulls),
        Values::Int32(v) => make_primitive_array::<Int32Type>(v, nulls),
        Values::Int64(v) => make_primitive_array::<Int64Type>(v, nulls),
        Values::UInt8(v) => make_primitive_array::<UInt8Type>(v, nulls),
        Values::UInt16(v) => make_primitive_array::<UInt16Type>(v, nulls),
        Values::UInt32(v) => make_primitive_array::<UInt32Type>(v, nulls),
        Values::UInt64(v) => make_primitive_array::<UInt64Type>(v, nulls),
        Values::Float32(v) => make_primitive_array::<Float32Type>(v, nulls),
        Values::Float64(v) => make_primitive_array::<Float64Type>(v, nulls),
    }
}

fn make_primitive_array<T: ArrowPrimitiveType>(
    values: &[T::Native],
    nulls: Option<NullBuffer>,
) -> Result<ArrayRef> {
    PrimitiveArray::<T>::try_new(ScalarBuffer::from(values.to_vec()), nulls)
        .map(|arr| Arc::new(arr) as ArrayRef)
        .map_err(|e| Error::arrow("make_primitive_array", e))
}
