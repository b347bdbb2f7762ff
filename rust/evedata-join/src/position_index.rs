//! The shared row axis of a join.

use evedata_format::{FillRule, PosRef};
use evedata_sequence::DataSeries;
use itertools::Itertools;

/// Strictly ascending position references used as the rows of a joined table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionIndex(Vec<PosRef>);

impl PositionIndex {
    /// Computes the row index for joining `series` under `rule`: the
    /// intersection of all position reference sets for `NoFill`, their union
    /// otherwise. No input yields an empty index.
    pub fn compute<S: DataSeries>(series: &[S], rule: FillRule) -> PositionIndex {
        let lists = series.iter().map(|s| s.pos_refs());
        if rule.intersects() {
            PositionIndex::intersection(lists)
        } else {
            PositionIndex::union(lists)
        }
    }

    /// Union of strictly ascending lists.
    pub fn union<'a, I>(lists: I) -> PositionIndex
    where
        I: IntoIterator<Item = &'a [PosRef]>,
    {
        PositionIndex(
            lists
                .into_iter()
                .map(|list| list.iter().copied())
                .kmerge()
                .dedup()
                .collect(),
        )
    }

    /// Intersection of strictly ascending lists.
    pub fn intersection<'a, I>(lists: I) -> PositionIndex
    where
        I: IntoIterator<Item = &'a [PosRef]>,
    {
        let mut lists = lists.into_iter().collect::<Vec<_>>();
        lists.sort_by_key(|list| list.len());
        let Some((shortest, rest)) = lists.split_first() else {
            return PositionIndex::default();
        };
        PositionIndex(
            shortest
                .iter()
                .copied()
                .filter(|pos_ref| rest.iter().all(|list| list.binary_search(pos_ref).is_ok()))
                .collect(),
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[PosRef] {
        &self.0
    }

    /// Row holding `pos_ref`, if the index contains it.
    pub fn row_of(&self, pos_ref: PosRef) -> Option<usize> {
        self.0.binary_search(&pos_ref).ok()
    }

    pub fn into_inner(self) -> Vec<PosRef> {
        self.0
    }
}

impl AsRef<[PosRef]> for PositionIndex {
    fn as_ref(&self) -> &[PosRef] {
        &self.0
    }
}
