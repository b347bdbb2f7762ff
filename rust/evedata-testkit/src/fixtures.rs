//! Small hand-written fixtures.

use std::io::Write;

use evedata_format::{DataType, Dimension, MetaData};
use evedata_sequence::Series;

/// Axis `SimMt:axis` sampled at {1,2,4} = {10,11,13}.
pub fn sample_axis() -> Series {
    let meta = MetaData::axis("SimMt:axis", DataType::Int32)
        .with_name("Motor")
        .with_unit("mm");
    Series::scalar(meta, vec![1, 2, 4], vec![10, 11, 13]).expect("valid fixture")
}

/// Channel `SimChan:chan` sampled at {1,3,4} = {0.5,0.7,0.9}.
pub fn sample_channel() -> Series {
    let meta = MetaData::channel("SimChan:chan", DataType::Float64)
        .with_name("Counter")
        .with_unit("counts");
    Series::scalar(meta, vec![1, 3, 4], vec![0.5, 0.7, 0.9]).expect("valid fixture")
}

/// Array channel `SimChan:spectrum` sampled at {2,4}.
pub fn sample_spectrum() -> Series {
    let meta = MetaData::channel("SimChan:spectrum", DataType::UInt16)
        .with_dimension(Dimension::array(2, 3));
    Series::array::<u16>(meta, vec![2, 4], vec![vec![1, 2, 3], vec![4, 5]]).expect("valid fixture")
}

/// A snapshot document with two chains; chain 1 has an axis, two channels
/// and a monitor series, and prefers the axis and the first channel.
pub fn snapshot_json() -> serde_json::Value {
    serde_json::json!({
        "file_metadata": { "Version": ["1.2"], "Location": ["Testlab"] },
        "log": ["scan started", "scan finished"],
        "chains": [
            {
                "id": 1,
                "metadata": { "StartTime": ["12:00:00"] },
                "preferred": ["SimMt:axis", "SimChan:chan"],
                "series": [
                    {
                        "meta": {
                            "id": "SimMt:axis", "name": "Motor", "unit": "mm",
                            "device_type": "axis", "data_type": "int32"
                        },
                        "pos_refs": [1, 2, 4],
                        "samples": { "scalar": [10, 11, 13] }
                    },
                    {
                        "meta": {
                            "id": "SimChan:chan", "name": "Counter", "unit": "counts",
                            "device_type": "channel", "data_type": "float64",
                            "normalize_id": "SimChan:norm"
                        },
                        "pos_refs": [1, 3, 4],
                        "samples": { "scalar": [0.5, 0.7, 0.9] },
                        "std_deviation": { "count": [5.0, 5.0, 5.0], "deviation": [0.1, 0.2, 0.1] }
                    },
                    {
                        "meta": {
                            "id": "SimChan:spectrum", "device_type": "channel",
                            "data_type": "uint16", "dimension": { "rows": 2, "columns": 3 }
                        },
                        "pos_refs": [2, 4],
                        "samples": { "array": [[1, 2, 3], [4, 5]] }
                    },
                    {
                        "meta": {
                            "id": "SimChan:status", "device_type": "channel",
                            "data_type": "string", "section": "monitor"
                        },
                        "pos_refs": [0, 3],
                        "samples": { "scalar": ["idle", "busy"] }
                    }
                ]
            },
            {
                "id": 2,
                "series": []
            }
        ]
    })
}

/// Writes [`snapshot_json`] into a temporary file.
pub fn snapshot_file() -> anyhow::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::NamedTempFile::new()?;
    serde_json::to_writer_pretty(&mut file, &snapshot_json())?;
    file.flush()?;
    Ok(file)
}
