//! Builder-style configuration of a join.

use evedata_common::Result;
use evedata_format::FillRule;
use evedata_sequence::DataSeries;

use crate::{JoinedTable, join, join_preferred};

/// Collects the inputs and options of a join.
///
/// ```
/// use evedata_format::{DataType, FillRule, MetaData};
/// use evedata_join::JoinBuilder;
/// use evedata_sequence::Series;
///
/// let axis = Series::scalar(MetaData::axis("m", DataType::Int32), vec![1, 3], vec![5, 6]).unwrap();
/// let chan = Series::scalar(MetaData::channel("c", DataType::Float64), vec![2], vec![0.5]).unwrap();
/// let table = JoinBuilder::new()
///     .with_fill_rule(FillRule::LastFill)
///     .with_series([&axis, &chan])
///     .build()
///     .unwrap();
/// assert_eq!(table.pos_refs(), [1, 2, 3]);
/// assert_eq!(table.values::<i32>(0).unwrap(), [5, 5, 6]);
/// ```
#[derive(Debug, Clone)]
pub struct JoinBuilder<S> {
    series: Vec<S>,
    rule: FillRule,
    preferred: Option<Vec<String>>,
}

impl<S> Default for JoinBuilder<S> {
    fn default() -> Self {
        JoinBuilder {
            series: Vec::new(),
            rule: FillRule::default(),
            preferred: None,
        }
    }
}

impl<S: DataSeries> JoinBuilder<S> {
    pub fn new() -> JoinBuilder<S> {
        JoinBuilder::default()
    }

    /// Sets the fill rule (default: [`FillRule::NoFill`]).
    pub fn with_fill_rule(mut self, rule: FillRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn add_series(mut self, series: S) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_series(mut self, series: impl IntoIterator<Item = S>) -> Self {
        self.series.extend(series);
        self
    }

    /// Restricts the output to the series with these XML-IDs, in this order.
    pub fn with_preferred<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.preferred = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn fill_rule(&self) -> FillRule {
        self.rule
    }

    /// Runs the join.
    pub fn build(self) -> Result<JoinedTable> {
        match &self.preferred {
            Some(ids) => join_preferred(&self.series, ids.as_slice(), self.rule),
            None => join(&self.series, self.rule),
        }
    }
}
