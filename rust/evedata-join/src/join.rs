//! The join engine.

use evedata_common::{Result, error::Error, verify_data};
use evedata_format::{FillRule, PosRef};
use evedata_sequence::{DataSeries, Samples, TakeSlot, offsets::Offsets, presence::Presence};

use crate::{
    fill::{FillResolver, Resolution},
    position_index::PositionIndex,
    table::{Column, ColumnData, FillSummary, JoinedTable},
};

/// Joins `series` into one table under `rule`.
///
/// Output columns follow the input order. Rows are the union of all input
/// position references (or their intersection for [`FillRule::NoFill`]),
/// ascending. An empty input yields an empty table.
///
/// Inputs must not be mutated while the join runs.
///
/// # Errors
///
/// Fails with `InvalidFormat` if an input violates the [`DataSeries`]
/// contract (position references not strictly ascending, a sample count
/// different from the position reference count, or array offsets that do not
/// match the stored values).
pub fn join<S: DataSeries>(series: &[S], rule: FillRule) -> Result<JoinedTable> {
    for s in series {
        verify_series(s)?;
    }
    if series.is_empty() {
        return Ok(JoinedTable::empty(rule));
    }

    let index = PositionIndex::compute(series, rule);
    let columns = series
        .iter()
        .map(|s| join_column(s, index.as_slice(), rule))
        .collect::<Vec<_>>();

    tracing::debug!(
        inputs = series.len(),
        rows = index.len(),
        rule = %rule,
        "joined series"
    );

    Ok(JoinedTable {
        index,
        columns,
        rule,
    })
}

/// Joins the series whose XML-IDs are listed in `preferred`, in that order.
///
/// Which devices are preferred is decided by the chain; this only selects
/// them from the fetched `series`.
///
/// # Errors
///
/// Fails with `NotFound` if a preferred id has no series in `series`.
pub fn join_preferred<S: DataSeries>(
    series: &[S],
    preferred: &[impl AsRef<str>],
    rule: FillRule,
) -> Result<JoinedTable> {
    let selected = preferred
        .iter()
        .map(|id| {
            let id = id.as_ref();
            series
                .iter()
                .find(|s| s.meta().id == id)
                .ok_or_else(|| Error::not_found(id))
        })
        .collect::<Result<Vec<_>>>()?;
    join(&selected, rule)
}

fn verify_series<S: DataSeries>(series: &S) -> Result<()> {
    let pos_refs = series.pos_refs();
    verify_data!(pos_refs, pos_refs.windows(2).all(|w| w[0] < w[1]));
    verify_data!(samples, series.samples().len() == pos_refs.len());
    verify_data!(samples, series.samples().is_consistent());
    Ok(())
}

/// Resolves every row of one series and gathers its column.
fn join_column<S: DataSeries>(series: &S, rows: &[PosRef], rule: FillRule) -> Column {
    let mut resolver = FillResolver::new(series, rule);
    let mut summary = FillSummary::default();
    let resolutions = rows
        .iter()
        .map(|&pos_ref| {
            let resolution = resolver.resolve(pos_ref);
            match resolution {
                Resolution::Exact(_) => summary.exact += 1,
                Resolution::Carried(_) => summary.carried += 1,
                Resolution::NotANumber => summary.nan_filled += 1,
                Resolution::Absent => summary.absent += 1,
            }
            resolution
        })
        .collect::<Vec<_>>();
    debug_assert!(
        rule != FillRule::NoFill || summary.is_exact(),
        "intersection rows must resolve exactly"
    );

    let presence = resolutions
        .iter()
        .map(|r| !matches!(r, Resolution::Absent))
        .collect::<Presence>();
    let data = match series.samples() {
        Samples::Scalar(values) => {
            let slots = resolutions
                .iter()
                .map(|r| match *r {
                    Resolution::Exact(i) | Resolution::Carried(i) => TakeSlot::Index(i),
                    Resolution::NotANumber => TakeSlot::NotANumber,
                    Resolution::Absent => TakeSlot::Placeholder,
                })
                .collect::<Vec<_>>();
            ColumnData::Scalar {
                values: values.take(&slots),
                presence,
            }
        }
        Samples::Array { offsets, values } => {
            let sources = resolutions
                .iter()
                .map(Resolution::sample_index)
                .collect::<Vec<_>>();
            ColumnData::Array {
                offsets: Offsets::from_lengths(
                    sources.iter().map(|s| s.map_or(0, |i| offsets.len_at(i))),
                ),
                values: values.take_ranges(sources.iter().flatten().map(|&i| offsets.range_at(i))),
                presence,
            }
        }
    };

    let policy = resolver.policy();
    tracing::trace!(
        column = %series.meta().id,
        ?policy,
        exact = summary.exact,
        carried = summary.carried,
        nan_filled = summary.nan_filled,
        absent = summary.absent,
        "resolved column"
    );

    Column {
        meta: series.meta().clone(),
        data,
        policy,
        summary,
        average: series.average().cloned(),
        std_deviation: series.std_deviation().cloned(),
    }
}
