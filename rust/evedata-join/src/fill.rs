//! Per-cell fill resolution.
//!
//! A [`FillResolver`] decides, for one series and an ascending sequence of
//! target position references, where each cell's value comes from:
//!
//! 1. an exact sample at the target always wins, under every rule;
//! 2. otherwise the series' [`FillPolicy`] applies: carry the latest prior
//!    sample forward (axes), store NaN (floating-point channels), or leave the
//!    cell absent.
//!
//! Resolution only looks at the series' own history, never at sibling
//! columns.

use evedata_format::{DeviceType, FillRule, PosRef};
use evedata_sequence::DataSeries;

/// Source of one resolved cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The series has a sample at the target; holds the sample index.
    Exact(usize),
    /// Carried forward from the sample at this index (the latest one before
    /// the target).
    Carried(usize),
    /// Filled with NaN.
    NotANumber,
    /// No value.
    Absent,
}

impl Resolution {
    /// Index of the sample providing the value, for exact and carried cells.
    pub fn sample_index(&self) -> Option<usize> {
        match *self {
            Resolution::Exact(i) | Resolution::Carried(i) => Some(i),
            Resolution::NotANumber | Resolution::Absent => None,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Resolution::Exact(_))
    }
}

/// How missing cells of a series are synthesized under a given rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillPolicy {
    /// Only exact samples; missing cells are absent. Applies to `NoFill`,
    /// unknown devices, and device types the rule does not address.
    ExactOnly,
    /// Missing cells repeat the latest prior sample (axes under `LastFill`
    /// and `LastNANFill`).
    CarryForward,
    /// Missing cells are NaN (floating-point channels under `NANFill` and
    /// `LastNANFill`).
    NotANumber,
    /// The rule addresses this device type but has no defined behavior for
    /// the series' shape or value type (array data, non-floating channels
    /// under NaN filling). Missing cells are absent.
    Unsupported,
}

impl FillPolicy {
    /// Determines the policy for a series of the given kind under `rule`.
    pub fn select(
        rule: FillRule,
        device_type: DeviceType,
        is_array: bool,
        is_floating: bool,
    ) -> FillPolicy {
        let addressed = match device_type {
            DeviceType::Axis => rule.carries_axes(),
            DeviceType::Channel => rule.nan_fills_channels(),
            DeviceType::Unknown => false,
        };
        if !addressed {
            return FillPolicy::ExactOnly;
        }
        if is_array {
            return FillPolicy::Unsupported;
        }
        match device_type {
            DeviceType::Axis => FillPolicy::CarryForward,
            DeviceType::Channel if is_floating => FillPolicy::NotANumber,
            _ => FillPolicy::Unsupported,
        }
    }

    /// Policy for `series` under `rule`.
    pub fn for_series<S: DataSeries + ?Sized>(series: &S, rule: FillRule) -> FillPolicy {
        FillPolicy::select(
            rule,
            series.device_type(),
            series.is_array(),
            series.data_type().is_floating(),
        )
    }

    /// Resolution of a cell with no exact sample, given the index of the
    /// latest sample before the target (if any).
    #[inline]
    fn fill(&self, prior: Option<usize>) -> Resolution {
        match self {
            FillPolicy::CarryForward => prior.map_or(Resolution::Absent, Resolution::Carried),
            FillPolicy::NotANumber => Resolution::NotANumber,
            FillPolicy::ExactOnly | FillPolicy::Unsupported => Resolution::Absent,
        }
    }
}

/// Resolves the cells of one series for strictly ascending targets.
///
/// The resolver keeps a cursor into the series' position references, so a
/// pass over `M` targets costs `O(M + N)` for a series of `N` samples.
pub struct FillResolver<'a> {
    pos_refs: &'a [PosRef],
    policy: FillPolicy,
    /// Number of samples with a position reference below the last target.
    cursor: usize,
    last_target: Option<PosRef>,
}

impl<'a> FillResolver<'a> {
    pub fn new<S: DataSeries + ?Sized>(series: &'a S, rule: FillRule) -> FillResolver<'a> {
        FillResolver::with_policy(series.pos_refs(), FillPolicy::for_series(series, rule))
    }

    /// Creates a resolver over strictly ascending `pos_refs`.
    pub fn with_policy(pos_refs: &'a [PosRef], policy: FillPolicy) -> FillResolver<'a> {
        FillResolver {
            pos_refs,
            policy,
            cursor: 0,
            last_target: None,
        }
    }

    pub fn policy(&self) -> FillPolicy {
        self.policy
    }

    /// Resolves the cell at `pos_ref`.
    ///
    /// # Panics
    ///
    /// Panics if `pos_ref` is not greater than the previously resolved target.
    pub fn resolve(&mut self, pos_ref: PosRef) -> Resolution {
        if let Some(last) = self.last_target {
            assert!(
                pos_ref > last,
                "fill targets must be strictly ascending ({pos_ref} after {last})"
            );
        }
        self.last_target = Some(pos_ref);

        while self.cursor < self.pos_refs.len() && self.pos_refs[self.cursor] < pos_ref {
            self.cursor += 1;
        }
        if self.pos_refs.get(self.cursor) == Some(&pos_ref) {
            return Resolution::Exact(self.cursor);
        }
        self.policy.fill(self.cursor.checked_sub(1))
    }
}

/// Resolves a single cell of `series` at `pos_ref` under `rule`, without
/// cursor state.
pub fn resolve<S: DataSeries + ?Sized>(series: &S, pos_ref: PosRef, rule: FillRule) -> Resolution {
    let pos_refs = series.pos_refs();
    let below = pos_refs.partition_point(|&p| p < pos_ref);
    if pos_refs.get(below) == Some(&pos_ref) {
        return Resolution::Exact(below);
    }
    FillPolicy::for_series(series, rule).fill(below.checked_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_selection() {
        use DeviceType::*;
        use FillRule::*;

        assert_eq!(FillPolicy::select(NoFill, Axis, false, true), FillPolicy::ExactOnly);
        assert_eq!(
            FillPolicy::select(LastFill, Axis, false, false),
            FillPolicy::CarryForward
        );
        assert_eq!(
            FillPolicy::select(LastNANFill, Axis, false, true),
            FillPolicy::CarryForward
        );
        assert_eq!(FillPolicy::select(NANFill, Axis, false, true), FillPolicy::ExactOnly);
        assert_eq!(
            FillPolicy::select(NANFill, Channel, false, true),
            FillPolicy::NotANumber
        );
        assert_eq!(
            FillPolicy::select(NANFill, Channel, false, false),
            FillPolicy::Unsupported
        );
        assert_eq!(FillPolicy::select(LastFill, Channel, false, true), FillPolicy::ExactOnly);
        assert_eq!(
            FillPolicy::select(LastNANFill, Channel, true, true),
            FillPolicy::Unsupported
        );
        assert_eq!(FillPolicy::select(LastFill, Axis, true, true), FillPolicy::Unsupported);
        for rule in FillRule::ALL {
            assert_eq!(FillPolicy::select(rule, Unknown, false, true), FillPolicy::ExactOnly);
        }
    }

    #[test]
    fn test_carry_forward_cursor() {
        let pos_refs = [2, 5, 6];
        let mut resolver = FillResolver::with_policy(&pos_refs, FillPolicy::CarryForward);
        assert_eq!(resolver.resolve(1), Resolution::Absent);
        assert_eq!(resolver.resolve(2), Resolution::Exact(0));
        assert_eq!(resolver.resolve(3), Resolution::Carried(0));
        assert_eq!(resolver.resolve(4), Resolution::Carried(0));
        assert_eq!(resolver.resolve(5), Resolution::Exact(1));
        assert_eq!(resolver.resolve(6), Resolution::Exact(2));
        assert_eq!(resolver.resolve(100), Resolution::Carried(2));
    }

    #[test]
    fn test_nan_and_exact_only_cursor() {
        let pos_refs = [1, 3];
        let mut nan = FillResolver::with_policy(&pos_refs, FillPolicy::NotANumber);
        let mut exact = FillResolver::with_policy(&pos_refs, FillPolicy::ExactOnly);
        for (target, expected_nan, expected_exact) in [
            (0, Resolution::NotANumber, Resolution::Absent),
            (1, Resolution::Exact(0), Resolution::Exact(0)),
            (2, Resolution::NotANumber, Resolution::Absent),
            (3, Resolution::Exact(1), Resolution::Exact(1)),
            (4, Resolution::NotANumber, Resolution::Absent),
        ] {
            assert_eq!(nan.resolve(target), expected_nan);
            assert_eq!(exact.resolve(target), expected_exact);
        }
    }

    #[test]
    fn test_empty_series_resolves_by_policy() {
        let mut carry = FillResolver::with_policy(&[], FillPolicy::CarryForward);
        assert_eq!(carry.resolve(-5), Resolution::Absent);
        let mut nan = FillResolver::with_policy(&[], FillPolicy::NotANumber);
        assert_eq!(nan.resolve(-5), Resolution::NotANumber);
    }

    #[test]
    #[should_panic(expected = "fill targets must be strictly ascending")]
    fn test_descending_targets_panic() {
        let mut resolver = FillResolver::with_policy(&[1, 2], FillPolicy::ExactOnly);
        resolver.resolve(2);
        resolver.resolve(2);
    }

    #[test]
    fn test_resolution_sample_index() {
        assert_eq!(Resolution::Exact(3).sample_index(), Some(3));
        assert_eq!(Resolution::Carried(1).sample_index(), Some(1));
        assert_eq!(Resolution::NotANumber.sample_index(), None);
        assert!(!Resolution::Absent.is_exact());
    }
}
