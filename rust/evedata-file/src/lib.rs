//! Read access to scan data files.
//!
//! [`DataFile`] is the boundary the rest of the workspace reads through: it
//! lists chains and device metadata, fetches series and joins them.
//! [`SnapshotFile`] implements it over a JSON snapshot of a scan.

pub mod data_file;
mod model;
pub mod snapshot;

pub use data_file::DataFile;
pub use snapshot::SnapshotFile;
