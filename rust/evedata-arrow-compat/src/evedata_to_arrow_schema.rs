//! Mapping of sample types and device metadata to `arrow_schema` types.

use std::{collections::HashMap, sync::Arc};

use arrow_schema::{DataType as ArrowDataType, Field as ArrowField};
use evedata_common::{Result, error::Error};
use evedata_format::{DataType, MetaData};

/// Field metadata key holding the device unit.
pub const UNIT_KEY: &str = "unit";
/// Field metadata key holding the device type (`axis`, `channel`, `unknown`).
pub const DEVICE_TYPE_KEY: &str = "device_type";
/// Field metadata key holding the device display name.
pub const NAME_KEY: &str = "name";

/// Name of the element field of list columns.
pub const LIST_ITEM_NAME: &str = "item";

/// Arrow type of a single sample element.
///
/// Fails for [`DataType::Unknown`], which has no storage.
pub fn data_type_to_arrow(data_type: DataType) -> Result<ArrowDataType> {
    let arrow_dt = match data_type {
        DataType::Unknown => {
            return Err(Error::invalid_arg(
                "data_type",
                "unknown sample type has no Arrow equivalent",
            ));
        }
        DataType::String => ArrowDataType::Utf8,
        DataType::Int8 => ArrowDataType::Int8,
        DataType::Int16 => ArrowDataType::Int16,
        DataType::Int32 => ArrowDataType::Int32,
        DataType::Int64 => ArrowDataType::Int64,
        DataType::UInt8 => ArrowDataType::UInt8,
        DataType::UInt16 => ArrowDataType::UInt16,
        DataType::UInt32 => ArrowDataType::UInt32,
        DataType::UInt64 => ArrowDataType::UInt64,
        DataType::Float32 => ArrowDataType::Float32,
        DataType::Float64 => ArrowDataType::Float64,
    };
    Ok(arrow_dt)
}

/// Arrow type of a column: the element type, wrapped in a `List` for array
/// data.
pub fn column_data_type(data_type: DataType, is_array: bool) -> Result<ArrowDataType> {
    let element = data_type_to_arrow(data_type)?;
    Ok(if is_array {
        ArrowDataType::List(list_item_field(element))
    } else {
        element
    })
}

pub(crate) fn list_item_field(element: ArrowDataType) -> Arc<ArrowField> {
    Arc::new(ArrowField::new(LIST_ITEM_NAME, element, false))
}

/// A trait for converting device metadata into an `arrow_schema::Field`.
pub trait ToArrowField {
    /// Builds a nullable field named after the device, typed by `data_type`
    /// and shaped by `is_array`.
    fn to_arrow_field(&self, data_type: DataType, is_array: bool) -> Result<ArrowField>;
}

impl ToArrowField for MetaData {
    fn to_arrow_field(&self, data_type: DataType, is_array: bool) -> Result<ArrowField> {
        let name = if self.id.is_empty() {
            &self.name
        } else {
            &self.id
        };
        let metadata = HashMap::from([
            (UNIT_KEY.to_string(), self.unit.clone()),
            (DEVICE_TYPE_KEY.to_string(), self.device_type.to_string()),
            (NAME_KEY.to_string(), self.display_name().to_string()),
        ]);
        Ok(
            ArrowField::new(name, column_data_type(data_type, is_array)?, true)
                .with_metadata(metadata),
        )
    }
}
