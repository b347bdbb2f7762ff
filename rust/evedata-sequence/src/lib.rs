//! Typed, in-memory storage for the samples of one device.
//!
//! This crate provides the building blocks consumed by the join engine:
//!
//! - [`crate::values::Values`]: a closed tagged union holding one `Vec<T>` per
//!   supported value type. Typed access goes through the
//!   [`crate::values::NativeValue`] trait, so a caller can never reinterpret
//!   a buffer as the wrong type.
//! - [`crate::presence::Presence`]: validity (present/absent) tracking for the
//!   slots of a column.
//! - [`crate::offsets::Offsets`]: element offsets of array (per-row vector) data.
//! - [`crate::samples::Samples`]: scalar or array payload of a series.
//! - [`crate::series::DataSeries`]: the capability set a join consumes, and
//!   [`crate::series::Series`], its concrete, immutable implementation.
//!
//! # Supported value types
//!
//! `String`, `Int8`..`Int64`, `UInt8`..`UInt64`, `Float32` and `Float64`
//! (see [`evedata_format::DataType`]).

pub mod companion;
pub mod offsets;
pub mod presence;
pub mod samples;
pub mod series;
pub mod values;

pub use companion::{AverageData, StdDeviationData};
pub use samples::Samples;
pub use series::{DataSeries, Series};
pub use values::{NativeValue, TakeSlot, Values};
