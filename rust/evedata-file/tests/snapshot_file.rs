use evedata_common::error::ErrorKind;
use evedata_file::{DataFile, SnapshotFile};
use evedata_format::{FillRule, Section};
use evedata_sequence::DataSeries;
use evedata_testkit::fixtures;

fn open_fixture() -> SnapshotFile {
    let file = fixtures::snapshot_file().unwrap();
    SnapshotFile::open(file.path()).unwrap()
}

#[test]
fn test_open_selects_chain_one() {
    let file = open_fixture();
    assert_eq!(file.chains(), [1, 2]);
    assert_eq!(file.chain(), 1);
    assert_eq!(file.file_metadata().get_first("Version"), Some("1.2"));
    assert_eq!(file.chain_metadata().get_first("StartTime"), Some("12:00:00"));
    assert_eq!(file.log_data(), ["scan started", "scan finished"]);
    assert_eq!(file.preferred_ids(), ["SimMt:axis", "SimChan:chan"]);
}

#[test]
fn test_metadata_by_section_and_filter() {
    let file = open_fixture();
    let ids = |section, filter| {
        file.metadata(section, filter)
            .iter()
            .map(|m| m.id.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(
        ids(Section::Standard, ""),
        ["SimMt:axis", "SimChan:chan", "SimChan:spectrum"]
    );
    assert_eq!(ids(Section::Standard, "SimChan"), ["SimChan:chan", "SimChan:spectrum"]);
    assert_eq!(ids(Section::Monitor, ""), ["SimChan:status"]);
    assert!(ids(Section::Snapshot, "").is_empty());
}

#[test]
fn test_data_fetches_typed_series() {
    let file = open_fixture();
    let metadata = file.metadata(Section::Standard, "");
    let series = file.data(&metadata).unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series[0].scalar_values::<i32>().unwrap(), [10, 11, 13]);
    assert!(series[1].has_std_deviation());
    assert_eq!(series[1].meta().normalize_id.as_deref(), Some("SimChan:norm"));
    assert!(series[2].is_array());
    assert_eq!(series[2].array_value_count(4), 2);
    assert_eq!(series[2].array_value_count(1), -1);
}

#[test]
fn test_data_of_unknown_device_fails() {
    let mut file = open_fixture();
    let metadata = file.metadata(Section::Standard, "SimMt");
    file.set_chain(2).unwrap();
    assert!(file.metadata(Section::Standard, "").is_empty());
    let err = file.data(&metadata).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::NotFound { element } if element == "SimMt:axis"));
}

#[test]
fn test_set_unknown_chain_fails() {
    let mut file = open_fixture();
    let err = file.set_chain(7).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
    assert_eq!(file.chain(), 1);
}

#[test]
fn test_joined_and_preferred_data() {
    let file = open_fixture();
    let metadata = file.metadata(Section::Standard, "");
    let table = file.joined_data(&metadata, FillRule::NoFill).unwrap();
    assert_eq!(table.pos_refs(), [4]);
    assert_eq!(table.column_count(), 3);

    let table = file.preferred_data(FillRule::LastNANFill).unwrap();
    assert_eq!(table.pos_refs(), [1, 2, 3, 4]);
    assert_eq!(table.values::<i32>(0).unwrap(), [10, 11, 11, 13]);
    assert!(table.value::<f64>(1, 1).unwrap().unwrap().is_nan());
}

#[test]
fn test_preferred_data_of_empty_chain() {
    let mut file = open_fixture();
    file.set_chain(2).unwrap();
    assert!(file.preferred_ids().is_empty());
    let table = file.preferred_data(FillRule::LastFill).unwrap();
    assert!(table.is_empty());
    assert!(file.chain_metadata().is_empty());
}

#[test]
fn test_malformed_documents() {
    let err = SnapshotFile::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Json { .. }));

    let err = SnapshotFile::from_json_str(r#"{ "chains": [{ "id": 1 }, { "id": 1 }] }"#)
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidFormat { .. }));

    let err = SnapshotFile::open("/nonexistent/evedata/snapshot.json").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Io { .. }));
}

#[test]
fn test_first_chain_without_chain_one() {
    let file = SnapshotFile::from_json_str(r#"{ "chains": [{ "id": 5 }, { "id": 3 }] }"#).unwrap();
    assert_eq!(file.chains(), [3, 5]);
    assert_eq!(file.chain(), 3);
}
