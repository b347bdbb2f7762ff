//! Serde model of the snapshot document.
//!
//! Sample values are kept as untyped JSON until the owning series' data type
//! is known.

use serde::Deserialize;
use serde_json::Value;

use evedata_common::{Result, error::Error};
use evedata_format::{Attributes, DataType, MetaData, PosRef};
use evedata_sequence::{
    AverageData, NativeValue, Samples, Series, StdDeviationData, Values, offsets::Offsets,
};

#[derive(Debug, Deserialize)]
pub(crate) struct SnapshotDoc {
    #[serde(default)]
    pub file_metadata: Attributes,
    #[serde(default)]
    pub log: Vec<String>,
    #[serde(default)]
    pub chains: Vec<ChainDoc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChainDoc {
    pub id: i32,
    #[serde(default)]
    pub metadata: Attributes,
    #[serde(default)]
    pub preferred: Vec<String>,
    #[serde(default)]
    pub series: Vec<SeriesDoc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SeriesDoc {
    pub meta: MetaData,
    pub pos_refs: Vec<PosRef>,
    pub samples: SamplesDoc,
    #[serde(default)]
    pub average: Option<AverageData>,
    #[serde(default)]
    pub std_deviation: Option<StdDeviationData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SamplesDoc {
    Scalar(Vec<Value>),
    Array(Vec<Vec<Value>>),
}

impl SeriesDoc {
    /// Builds the typed series described by this entry.
    pub fn into_series(self) -> Result<Series> {
        let mut meta = self.meta;
        meta.dimension.rows = self.pos_refs.len();
        let samples = match self.samples {
            SamplesDoc::Scalar(values) => {
                Samples::Scalar(typed_values(&meta.id, meta.data_type, values)?)
            }
            SamplesDoc::Array(rows) => {
                let offsets = Offsets::from_lengths(rows.iter().map(Vec::len));
                let values = rows.into_iter().flatten().collect();
                Samples::try_array(offsets, typed_values(&meta.id, meta.data_type, values)?)?
            }
        };
        let mut series = Series::try_new(meta, self.pos_refs, samples)?;
        if let Some(average) = self.average {
            series = series.with_average(average)?;
        }
        if let Some(std_deviation) = self.std_deviation {
            series = series.with_std_deviation(std_deviation)?;
        }
        Ok(series)
    }
}

fn typed_values(id: &str, data_type: DataType, values: Vec<Value>) -> Result<Values> {
    let values = Value::Array(values);
    match data_type {
        DataType::Unknown => Err(Error::invalid_format(
            id,
            "series without a data type cannot hold samples",
        )),
        DataType::String => parse::<String>(id, values),
        DataType::Int8 => parse::<i8>(id, values),
        DataType::Int16 => parse::<i16>(id, values),
        DataType::Int32 => parse::<i32>(id, values),
        DataType::Int64 => parse::<i64>(id, values),
        DataType::UInt8 => parse::<u8>(id, values),
        DataType::UInt16 => parse::<u16>(id, values),
        DataType::UInt32 => parse::<u32>(id, values),
        DataType::UInt64 => parse::<u64>(id, values),
        DataType::Float32 => parse::<f32>(id, values),
        DataType::Float64 => parse::<f64>(id, values),
    }
}

fn parse<T>(id: &str, values: Value) -> Result<Values>
where
    T: NativeValue + serde::de::DeserializeOwned,
{
    serde_json::from_value::<Vec<T>>(values)
        .map(Values::from)
        .map_err(|e| Error::json(id, e))
}
