use std::sync::Arc;

use evedata_common::error::ErrorKind;
use evedata_format::{DataType, DeviceType, Dimension, FillRule, MetaData, PosRef};
use evedata_sequence::{AverageData, DataSeries, Samples, Series, Values, offsets::Offsets};
use evedata_testkit::fixtures::{sample_axis, sample_channel, sample_spectrum};

use crate::{FillPolicy, FillSummary, join, join_preferred};

fn float_axis() -> Series {
    let meta = MetaData::axis("SimMt:axis", DataType::Float64);
    Series::scalar(meta, vec![1, 2, 4], vec![10.0, 11.0, 13.0]).unwrap()
}

#[test]
fn test_last_nan_fill_example() {
    let table = join(&[float_axis(), sample_channel()], FillRule::LastNANFill).unwrap();
    assert_eq!(table.pos_refs(), [1, 2, 3, 4]);
    assert_eq!(table.row_count(), 4);
    assert_eq!(table.column_count(), 2);

    assert_eq!(table.values::<f64>(0).unwrap(), [10.0, 11.0, 11.0, 13.0]);
    let b = table.values::<f64>(1).unwrap();
    assert_eq!(b[0], 0.5);
    assert!(b[1].is_nan());
    assert_eq!(b[2], 0.7);
    assert_eq!(b[3], 0.9);
    assert!(table.column(1).unwrap().presence().is_trivial_non_null());

    assert_eq!(
        *table.column(0).unwrap().fill_summary(),
        FillSummary {
            exact: 3,
            carried: 1,
            nan_filled: 0,
            absent: 0
        }
    );
    assert_eq!(table.column(1).unwrap().fill_summary().nan_filled, 1);
}

#[test]
fn test_no_fill_example() {
    let table = join(&[float_axis(), sample_channel()], FillRule::NoFill).unwrap();
    assert_eq!(table.pos_refs(), [1, 4]);
    assert_eq!(table.values::<f64>(0).unwrap(), [10.0, 13.0]);
    assert_eq!(table.values::<f64>(1).unwrap(), [0.5, 0.9]);
    for column in table.columns() {
        assert!(column.fill_summary().is_exact());
        assert_eq!(column.fill_policy(), FillPolicy::ExactOnly);
    }
}

#[test]
fn test_last_fill_leaves_channel_absent() {
    let table = join(&[sample_axis(), sample_channel()], FillRule::LastFill).unwrap();
    assert_eq!(table.pos_refs(), [1, 2, 3, 4]);
    assert_eq!(table.values::<i32>(0).unwrap(), [10, 11, 11, 13]);
    assert_eq!(table.value::<f64>(1, 0).unwrap(), Some(0.5));
    assert_eq!(table.value::<f64>(1, 1).unwrap(), None);
    assert_eq!(table.value::<f64>(1, 2).unwrap(), Some(0.7));
    assert_eq!(table.column(1).unwrap().fill_summary().absent, 1);
}

#[test]
fn test_nan_fill_leaves_axis_absent() {
    let table = join(&[sample_axis(), sample_channel()], FillRule::NANFill).unwrap();
    assert_eq!(table.value::<i32>(0, 2).unwrap(), None);
    assert_eq!(table.value::<i32>(0, 1).unwrap(), Some(11));
    let nan = table.value::<f64>(1, 1).unwrap().unwrap();
    assert!(nan.is_nan());
}

#[test]
fn test_carry_forward_absent_before_first_sample() {
    let axis = Series::scalar(
        MetaData::axis("SimMt:late", DataType::Int64),
        vec![3, 5],
        vec![30i64, 50],
    )
    .unwrap();
    let channel = Series::scalar(
        MetaData::channel("SimChan:early", DataType::Float32),
        vec![1, 2, 3, 4, 5, 6],
        vec![0.1f32, 0.2, 0.3, 0.4, 0.5, 0.6],
    )
    .unwrap();
    let table = join(&[&axis, &channel], FillRule::LastNANFill).unwrap();
    let axis_col = table.column(0).unwrap();
    let cells = (0..table.row_count())
        .map(|row| axis_col.value::<i64>(row).unwrap())
        .collect::<Vec<_>>();
    assert_eq!(
        cells,
        [None, None, Some(30), Some(30), Some(50), Some(50)]
    );
    assert_eq!(axis_col.fill_summary().absent, 2);
    assert_eq!(axis_col.fill_summary().carried, 2);
}

#[test]
fn test_integer_and_string_channels_are_not_nan_filled() {
    let counts = Series::scalar(
        MetaData::channel("SimChan:counts", DataType::UInt32),
        vec![1, 3],
        vec![7u32, 9],
    )
    .unwrap();
    let status = Series::scalar(
        MetaData::channel("SimChan:status", DataType::String),
        vec![2, 3],
        vec!["idle".to_string(), "busy".to_string()],
    )
    .unwrap();
    let table = join(&[&counts, &status], FillRule::LastNANFill).unwrap();
    assert_eq!(table.pos_refs(), [1, 2, 3]);
    assert_eq!(table.value::<u32>(0, 1).unwrap(), None);
    assert_eq!(table.value::<String>(1, 0).unwrap(), None);
    assert_eq!(table.value::<String>(1, 2).unwrap().as_deref(), Some("busy"));
    for column in table.columns() {
        assert_eq!(column.fill_policy(), FillPolicy::Unsupported);
        assert_eq!(column.fill_summary().nan_filled, 0);
        assert_eq!(column.fill_summary().absent, 1);
    }
}

#[test]
fn test_unknown_device_type_is_never_filled() {
    let unknown = Series::scalar(
        MetaData::new("Sim:unknown", DeviceType::Unknown, DataType::Float64),
        vec![1],
        vec![1.0],
    )
    .unwrap();
    for rule in [FillRule::LastFill, FillRule::NANFill, FillRule::LastNANFill] {
        let table = join(&[&unknown, &float_axis()], rule).unwrap();
        let column = table.column(0).unwrap();
        assert_eq!(column.fill_policy(), FillPolicy::ExactOnly);
        assert_eq!(column.presence().count_nulls(), 2, "{rule}");
    }
}

#[test]
fn test_array_column_is_never_filled() {
    let axis = sample_axis();
    let spectrum = sample_spectrum();
    let series: [&dyn DataSeries; 2] = [&axis, &spectrum];
    let table = join(&series, FillRule::LastNANFill).unwrap();
    assert_eq!(table.pos_refs(), [1, 2, 4]);
    let column = table.column(1).unwrap();
    assert!(column.is_array());
    assert_eq!(column.fill_policy(), FillPolicy::Unsupported);
    assert_eq!(table.array::<u16>(1, 0).unwrap(), None);
    assert_eq!(table.array::<u16>(1, 1).unwrap(), Some(&[1, 2, 3][..]));
    assert_eq!(table.array::<u16>(1, 2).unwrap(), Some(&[4, 5][..]));
    assert_eq!(table.array_value_count(1, 0).unwrap(), -1);
    assert_eq!(table.array_value_count(1, 1).unwrap(), 3);
    assert_eq!(table.array_value_count(1, 2).unwrap(), 2);
    assert_eq!(table.column_value_count(1).unwrap(), -1);
    assert_eq!(table.column_value_count(0).unwrap(), 3);
    assert_eq!(table.array_value_count(0, 0).unwrap(), -1);
}

#[test]
fn test_array_and_scalar_under_no_fill() {
    let axis = sample_axis();
    let spectrum = sample_spectrum();
    let series: [&dyn DataSeries; 2] = [&spectrum, &axis];
    let table = join(&series, FillRule::NoFill).unwrap();
    assert_eq!(table.pos_refs(), [2, 4]);
    assert_eq!(table.array::<u16>(0, 0).unwrap(), Some(&[1, 2, 3][..]));
    assert_eq!(table.array::<u16>(0, 1).unwrap(), Some(&[4, 5][..]));
    assert_eq!(table.values::<i32>(1).unwrap(), [11, 13]);
}

#[test]
fn test_empty_input() {
    let none: [Series; 0] = [];
    for rule in FillRule::ALL {
        let table = join(&none, rule).unwrap();
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.row_count(), 0);
        assert!(table.is_empty());
        assert_eq!(table.fill_rule(), rule);
    }
}

#[test]
fn test_disjoint_series_under_no_fill() {
    let a = Series::scalar(MetaData::axis("a", DataType::Int8), vec![1, 2], vec![1i8, 2]).unwrap();
    let b = Series::scalar(MetaData::axis("b", DataType::Int8), vec![3, 4], vec![3i8, 4]).unwrap();
    let table = join(&[a, b], FillRule::NoFill).unwrap();
    assert_eq!(table.column_count(), 2);
    assert_eq!(table.row_count(), 0);
    assert_eq!(table.column_value_count(0).unwrap(), 0);
}

#[test]
fn test_accessor_faults() {
    let table = join(&[sample_axis(), sample_spectrum()], FillRule::NoFill).unwrap();
    assert!(matches!(
        table.column(2).unwrap_err().kind(),
        ErrorKind::IndexOutOfRange {
            what: "column",
            index: 2,
            len: 2
        }
    ));
    assert!(matches!(
        table.values::<f64>(0).unwrap_err().kind(),
        ErrorKind::TypeMismatch { .. }
    ));
    assert!(matches!(
        table.values::<u16>(1).unwrap_err().kind(),
        ErrorKind::ShapeMismatch {
            array_requested: false,
            ..
        }
    ));
    assert!(matches!(
        table.array::<i32>(0, 0).unwrap_err().kind(),
        ErrorKind::ShapeMismatch {
            array_requested: true,
            ..
        }
    ));
    assert!(matches!(
        table.value::<i32>(0, 99).unwrap_err().kind(),
        ErrorKind::IndexOutOfRange { what: "row", .. }
    ));
    assert_eq!(table.column_type(1).unwrap(), DataType::UInt16);
    assert_eq!(table.metadata(0).unwrap().unit, "mm");
}

#[test]
fn test_column_metadata_is_shared_with_input() {
    let axis = sample_axis();
    let table = join(&[&axis], FillRule::NoFill).unwrap();
    assert!(Arc::ptr_eq(table.metadata(0).unwrap(), axis.meta()));
    assert_eq!(table.find_column("SimMt:axis"), Some(0));
    assert_eq!(table.find_column("SimMt:other"), None);
}

#[test]
fn test_companions_are_carried_opaquely() {
    let channel = sample_channel()
        .with_average(AverageData {
            count: vec![4, 4, 3],
            ..Default::default()
        })
        .unwrap();
    let table = join(&[&channel, &sample_axis()], FillRule::LastNANFill).unwrap();
    let column = table.column(0).unwrap();
    assert_eq!(column.average().unwrap().count, [4, 4, 3]);
    assert!(column.std_deviation().is_none());
    assert!(table.column(1).unwrap().average().is_none());
}

#[test]
fn test_join_preferred_selects_in_order() {
    let series = vec![sample_spectrum(), sample_channel(), sample_axis()];
    let table = join_preferred(&series, &["SimMt:axis", "SimChan:chan"], FillRule::LastFill).unwrap();
    assert_eq!(table.column_count(), 2);
    assert_eq!(table.metadata(0).unwrap().id, "SimMt:axis");
    assert_eq!(table.metadata(1).unwrap().id, "SimChan:chan");

    let err = join_preferred(&series, &["SimMt:missing"], FillRule::LastFill).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::NotFound { .. }));
}

#[test]
fn test_to_series_round_trip() {
    let table = join(&[sample_axis(), sample_spectrum()], FillRule::LastFill).unwrap();
    let series = table.to_series().unwrap();
    assert_eq!(series[0].pos_refs(), [1, 2, 4]);
    assert_eq!(series[0].scalar_values::<i32>().unwrap(), [10, 11, 13]);
    assert_eq!(series[1].pos_refs(), [2, 4]);
    assert_eq!(series[1].array_values::<u16>(4).unwrap(), Some(&[4, 5][..]));
}

/// A `DataSeries` that breaks the ascending-order contract.
struct Unordered {
    meta: Arc<MetaData>,
    pos_refs: Vec<PosRef>,
    samples: Samples,
}

impl DataSeries for Unordered {
    fn meta(&self) -> &Arc<MetaData> {
        &self.meta
    }

    fn pos_refs(&self) -> &[PosRef] {
        &self.pos_refs
    }

    fn samples(&self) -> &Samples {
        &self.samples
    }
}

#[test]
fn test_contract_violations_are_reported() {
    let unordered = Unordered {
        meta: Arc::new(MetaData::axis("bad", DataType::Int32)),
        pos_refs: vec![2, 1],
        samples: Samples::Scalar(Values::from(vec![1, 2])),
    };
    let err = join(&[unordered], FillRule::LastFill).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidFormat { .. }));

    let short = Unordered {
        meta: Arc::new(
            MetaData::axis("short", DataType::Int32).with_dimension(Dimension::scalar(2)),
        ),
        pos_refs: vec![1, 2],
        samples: Samples::Scalar(Values::from(vec![1])),
    };
    let err = join(&[short], FillRule::LastFill).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidFormat { .. }));

    let overrun = Unordered {
        meta: Arc::new(
            MetaData::channel("overrun", DataType::Int32).with_dimension(Dimension::array(2, 3)),
        ),
        pos_refs: vec![1, 2],
        samples: Samples::Array {
            offsets: Offsets::from_lengths([3, 0]),
            values: Values::from(vec![1, 2]),
        },
    };
    for rule in FillRule::ALL {
        let err = join(&[&overrun], rule).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidFormat { .. }), "{rule}");
    }
}
