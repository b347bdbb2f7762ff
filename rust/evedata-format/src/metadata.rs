//! Per-device metadata describing one series (or one joined column).

use serde::{Deserialize, Serialize};

use crate::{Attributes, DataType, DeviceType, Section};

/// Number of rows and columns of a device's data.
///
/// `columns > 1` signals array data (e.g. a spectrum per position reference).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub rows: usize,
    pub columns: usize,
}

impl Dimension {
    pub fn scalar(rows: usize) -> Dimension {
        Dimension { rows, columns: 1 }
    }

    pub fn array(rows: usize, columns: usize) -> Dimension {
        Dimension { rows, columns }
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        self.columns > 1
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::scalar(0)
    }
}

/// Metadata of a single device (channel or axis).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaData {
    /// Id as used in the scan description (XML-ID).
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub unit: String,
    /// Channel identification string (usually the process variable name).
    #[serde(default)]
    pub channel_id: String,
    /// XML-ID of the channel used for normalization, if any.
    #[serde(default)]
    pub normalize_id: Option<String>,
    #[serde(default)]
    pub dimension: Dimension,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub device_type: DeviceType,
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default)]
    pub section: Section,
}

impl MetaData {
    pub fn new(id: impl Into<String>, device_type: DeviceType, data_type: DataType) -> MetaData {
        MetaData {
            id: id.into(),
            device_type,
            data_type,
            ..Default::default()
        }
    }

    pub fn channel(id: impl Into<String>, data_type: DataType) -> MetaData {
        MetaData::new(id, DeviceType::Channel, data_type)
    }

    pub fn axis(id: impl Into<String>, data_type: DataType) -> MetaData {
        MetaData::new(id, DeviceType::Axis, data_type)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> MetaData {
        self.name = name.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> MetaData {
        self.unit = unit.into();
        self
    }

    pub fn with_channel_id(mut self, channel_id: impl Into<String>) -> MetaData {
        self.channel_id = channel_id.into();
        self
    }

    pub fn with_normalize_id(mut self, normalize_id: impl Into<String>) -> MetaData {
        self.normalize_id = Some(normalize_id.into());
        self
    }

    pub fn with_dimension(mut self, dimension: Dimension) -> MetaData {
        self.dimension = dimension;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> MetaData {
        self.attributes.insert(key, value);
        self
    }

    pub fn with_section(mut self, section: Section) -> MetaData {
        self.section = section;
        self
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        self.dimension.is_array()
    }

    /// Name to display for this device: the name if set, else the XML-ID.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
