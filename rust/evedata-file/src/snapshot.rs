//! [`DataFile`] over a JSON snapshot of a scan.
//!
//! The document has this shape:
//!
//! ```json
//! {
//!   "file_metadata": { "Version": ["1.2"] },
//!   "log": ["scan started"],
//!   "chains": [{
//!     "id": 1,
//!     "metadata": { "StartTime": ["12:00:00"] },
//!     "preferred": ["SimMt:axis"],
//!     "series": [{
//!       "meta": { "id": "SimMt:axis", "device_type": "axis", "data_type": "int32" },
//!       "pos_refs": [1, 2, 4],
//!       "samples": { "scalar": [10, 11, 13] }
//!     }]
//!   }]
//! }
//! ```
//!
//! Array series use `{ "array": [[...], ...] }` samples and must declare a
//! `dimension` with more than one column. Every series is validated when the
//! file is opened.

use std::{path::Path, sync::Arc};

use evedata_common::{Result, error::Error};
use evedata_format::{Attributes, MetaData, Section};
use evedata_sequence::{DataSeries, Series};

use crate::{DataFile, model::SnapshotDoc};

/// Chain selected when a file is opened, if present.
pub const DEFAULT_CHAIN: i32 = 1;

#[derive(Debug)]
struct Chain {
    id: i32,
    metadata: Attributes,
    preferred: Vec<String>,
    series: Vec<Series>,
}

impl Chain {
    fn find(&self, meta: &MetaData) -> Option<&Series> {
        self.series
            .iter()
            .find(|s| s.meta().id == meta.id && s.meta().section == meta.section)
    }
}

/// An in-memory scan snapshot.
#[derive(Debug)]
pub struct SnapshotFile {
    file_metadata: Attributes,
    log: Vec<String>,
    chains: Vec<Chain>,
    current: usize,
}

impl SnapshotFile {
    /// Reads and validates the snapshot at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<SnapshotFile> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path.display().to_string(), e))?;
        let file = SnapshotFile::from_json_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            chains = file.chains.len(),
            "opened snapshot"
        );
        Ok(file)
    }

    /// Parses and validates a snapshot document.
    pub fn from_json_str(text: &str) -> Result<SnapshotFile> {
        let doc: SnapshotDoc =
            serde_json::from_str(text).map_err(|e| Error::json("snapshot document", e))?;

        let mut chains = doc
            .chains
            .into_iter()
            .map(|chain| {
                let series = chain
                    .series
                    .into_iter()
                    .map(|s| s.into_series())
                    .collect::<Result<Vec<_>>>()?;
                Ok(Chain {
                    id: chain.id,
                    metadata: chain.metadata,
                    preferred: chain.preferred,
                    series,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        chains.sort_by_key(|c| c.id);
        if let Some(w) = chains.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(Error::invalid_format(
                "chains",
                format!("duplicate chain id {}", w[0].id),
            ));
        }

        let current = chains
            .iter()
            .position(|c| c.id == DEFAULT_CHAIN)
            .unwrap_or(0);
        Ok(SnapshotFile {
            file_metadata: doc.file_metadata,
            log: doc.log,
            chains,
            current,
        })
    }

    fn current_chain(&self) -> Option<&Chain> {
        self.chains.get(self.current)
    }
}

static EMPTY_ATTRIBUTES: Attributes = Attributes::new();

impl DataFile for SnapshotFile {
    fn chains(&self) -> Vec<i32> {
        self.chains.iter().map(|c| c.id).collect()
    }

    /// Id of the selected chain, `0` for a file without chains.
    fn chain(&self) -> i32 {
        self.current_chain().map_or(0, |c| c.id)
    }

    fn set_chain(&mut self, chain: i32) -> Result<()> {
        let Some(index) = self.chains.iter().position(|c| c.id == chain) else {
            return Err(Error::invalid_arg("chain", format!("no chain {chain} in file")));
        };
        self.current = index;
        Ok(())
    }

    fn chain_metadata(&self) -> &Attributes {
        self.current_chain().map_or(&EMPTY_ATTRIBUTES, |c| &c.metadata)
    }

    fn file_metadata(&self) -> &Attributes {
        &self.file_metadata
    }

    fn metadata(&self, section: Section, filter: &str) -> Vec<Arc<MetaData>> {
        self.current_chain()
            .into_iter()
            .flat_map(|c| &c.series)
            .filter(|s| s.meta().section == section && s.meta().id.contains(filter))
            .map(|s| s.meta().clone())
            .collect()
    }

    fn data(&self, metadata: &[Arc<MetaData>]) -> Result<Vec<Series>> {
        let chain = self.current_chain();
        metadata
            .iter()
            .map(|meta| {
                chain
                    .and_then(|c| c.find(meta))
                    .cloned()
                    .ok_or_else(|| Error::not_found(&meta.id))
            })
            .collect()
    }

    fn preferred_ids(&self) -> &[String] {
        self.current_chain()
            .map_or(&[][..], |c| c.preferred.as_slice())
    }

    fn log_data(&self) -> &[String] {
        &self.log
    }
}
