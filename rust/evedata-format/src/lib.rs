//! Type vocabulary shared by the series, join and file layers: value type tags,
//! device types, fill rules, sections and per-device metadata.

pub mod attributes;
pub mod data_type;
pub mod device;
pub mod metadata;

pub use attributes::Attributes;
pub use data_type::DataType;
pub use device::{DeviceType, FillRule, Section};
pub use metadata::{Dimension, MetaData};

/// Position reference: the integer row key shared by all series of one chain.
///
/// Position references are only compared for equality and ordering; they are
/// neither contiguous nor zero-based.
pub type PosRef = i32;

/// Converts an element count to the `i32` of the count accessors, saturating
/// at `i32::MAX`.
#[inline]
pub fn count_to_i32(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}
