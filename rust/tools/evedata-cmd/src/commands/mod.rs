//! Command implementations for evedata-cmd

use anyhow::{Context, Result};
use evedata_file::SnapshotFile;

pub mod inspect;
pub mod join;

/// Opens the snapshot file at `path`.
pub fn open_file(path: &str) -> Result<SnapshotFile> {
    SnapshotFile::open(path).with_context(|| format!("Failed to open data file: {path}"))
}
