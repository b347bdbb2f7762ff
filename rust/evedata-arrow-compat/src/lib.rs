//! `evedata-arrow-compat` exposes joined scan data as Apache Arrow arrays.
//!
//! This crate includes:
//! - Mapping of sample types and device metadata to Arrow types and fields
//!   (`evedata_to_arrow_schema`).
//! - Conversion of joined columns into Arrow arrays (`column_to_array`).
//! - Conversion of a whole joined table into a `RecordBatch` (`table_to_batch`).
//! - evedata/Arrow error conversion.

pub mod column_to_array;
pub mod evedata_to_arrow_error;
pub mod evedata_to_arrow_schema;
pub mod table_to_batch;

pub use column_to_array::IntoArrowArray;
pub use table_to_batch::{POSREF_FIELD, joined_table_to_record_batch};
