use std::sync::Arc;

use evedata_common::Result;
use evedata_format::{Attributes, FillRule, MetaData, Section};
use evedata_join::{JoinedTable, join, join_preferred};
use evedata_sequence::Series;

/// A scan data file holding one or more chains.
///
/// All queries refer to the currently selected chain.
pub trait DataFile {
    /// Ids of all chains in the file, ascending.
    fn chains(&self) -> Vec<i32>;

    /// Id of the selected chain.
    fn chain(&self) -> i32;

    /// Selects the chain used by subsequent queries.
    ///
    /// Fails with `InvalidArgument` if the file has no such chain.
    fn set_chain(&mut self, chain: i32) -> Result<()>;

    fn chain_metadata(&self) -> &Attributes;

    fn file_metadata(&self) -> &Attributes;

    /// Metadata of the devices recorded in `section` whose XML-ID contains
    /// `filter`. An empty filter matches every device.
    fn metadata(&self, section: Section, filter: &str) -> Vec<Arc<MetaData>>;

    /// Fetches the series of each listed device, in order.
    ///
    /// Fails with `NotFound` if a device is not recorded in the chain.
    fn data(&self, metadata: &[Arc<MetaData>]) -> Result<Vec<Series>>;

    /// XML-IDs of the preferred devices of the chain, in display order.
    fn preferred_ids(&self) -> &[String];

    /// Free-form log lines of the scan.
    fn log_data(&self) -> &[String];

    /// Fetches and joins the listed devices under `rule`.
    fn joined_data(&self, metadata: &[Arc<MetaData>], rule: FillRule) -> Result<JoinedTable> {
        let series = self.data(metadata)?;
        join(&series, rule)
    }

    /// Joins the preferred devices of the chain under `rule`.
    fn preferred_data(&self, rule: FillRule) -> Result<JoinedTable> {
        let series = self.data(&self.metadata(Section::Standard, ""))?;
        join_preferred(&series, self.preferred_ids(), rule)
    }
}
